// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Tracked-IP Store
//!
//! Append-only history of investigations, persisted as a JSON array in
//! a single file.
//!
//! ## Guarantees
//! * **Single writer**: appends serialize on an internal async lock.
//! * **No torn reads**: every write lands in a temp file first and is
//!   renamed into place, so a concurrent [`TrackedStore::list_all`]
//!   observes the pre-append or post-append file, never a partial one.
//! * **Idempotent init**: opening a store that does not exist yet
//!   creates it empty; opening an existing one touches nothing.

use std::fs;
use std::path::{Path, PathBuf};

use stalkr_common::error::StoreError;
use stalkr_common::models::record::InvestigationRecord;
use tokio::sync::Mutex;

pub struct TrackedStore {
    path: PathBuf,
    writer: Mutex<()>,
}

impl TrackedStore {
    /// Opens the store at `path`, creating an empty history file if none
    /// exists yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path: PathBuf = path.into();

        if !path.exists() {
            write_atomically(&path, b"[]")
                .map_err(|e| StoreError::WriteFailure(e.to_string()))?;
        }

        Ok(Self {
            path,
            writer: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably appends one record.
    ///
    /// The whole history is rewritten through a temp file; the rename at
    /// the end is what makes the append atomic for readers.
    pub async fn append(&self, record: &InvestigationRecord) -> Result<(), StoreError> {
        let _guard = self.writer.lock().await;

        let mut records: Vec<InvestigationRecord> = self
            .read_records()
            .map_err(|e| StoreError::WriteFailure(format!("loading existing history: {e}")))?;
        records.push(record.clone());

        let encoded: Vec<u8> = serde_json::to_vec_pretty(&records)
            .map_err(|e| StoreError::WriteFailure(e.to_string()))?;

        write_atomically(&self.path, &encoded)
            .map_err(|e| StoreError::WriteFailure(e.to_string()))
    }

    /// Snapshot of the persisted history in insertion order.
    pub fn list_all(&self) -> Result<Vec<InvestigationRecord>, StoreError> {
        self.read_records()
            .map_err(|e| StoreError::ReadFailure(e.to_string()))
    }

    fn read_records(&self) -> anyhow::Result<Vec<InvestigationRecord>> {
        let bytes: Vec<u8> = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp: PathBuf = path.to_path_buf();
    tmp.set_extension("json.tmp");

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stalkr_common::error::ProbeError;
    use stalkr_common::models::address::Address;
    use stalkr_common::models::record::{
        GeoInfo, PortReport, ProbeKind, ProbeResult, RdnsInfo, ReputationReport,
    };

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stalkr-store-{tag}-{}.json", std::process::id()))
    }

    fn sample_record(last_octet: u8) -> InvestigationRecord {
        let target = Address::validate(&format!("10.0.0.{last_octet}")).unwrap();
        InvestigationRecord::new(
            target,
            Utc::now(),
            vec![
                ProbeResult::Geolocation(GeoInfo::default()),
                ProbeResult::ReverseDns(RdnsInfo::default()),
                ProbeResult::Reputation(ReputationReport::default()),
                ProbeResult::Failure {
                    kind: ProbeKind::PortReachability,
                    error: ProbeError::Timeout,
                },
            ],
        )
    }

    #[test]
    fn open_creates_an_empty_history_once() {
        let path = scratch_path("init");
        let _ = fs::remove_file(&path);

        let store = TrackedStore::open(&path).unwrap();
        assert!(store.list_all().unwrap().is_empty());

        // Reopening must not disturb the existing file.
        let reopened = TrackedStore::open(&path).unwrap();
        assert!(reopened.list_all().unwrap().is_empty());

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn append_preserves_insertion_order() {
        let path = scratch_path("order");
        let _ = fs::remove_file(&path);

        let store = TrackedStore::open(&path).unwrap();
        for octet in 1..=5u8 {
            store.append(&sample_record(octet)).await.unwrap();
        }

        let listed = store.list_all().unwrap();
        assert_eq!(listed.len(), 5);
        for (idx, record) in listed.iter().enumerate() {
            assert_eq!(record.target.to_string(), format!("10.0.0.{}", idx + 1));
        }

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn appended_records_survive_reopening() {
        let path = scratch_path("reopen");
        let _ = fs::remove_file(&path);

        {
            let store = TrackedStore::open(&path).unwrap();
            store.append(&sample_record(42)).await.unwrap();
        }

        let reopened = TrackedStore::open(&path).unwrap();
        let listed = reopened.list_all().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].target.to_string(), "10.0.0.42");
        assert_eq!(listed[0].failed_slots(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unreadable_history_reports_read_failure() {
        let path = scratch_path("corrupt");
        fs::write(&path, b"{ not json").unwrap();

        let store = TrackedStore::open(&path).unwrap();
        assert!(matches!(
            store.list_all(),
            Err(StoreError::ReadFailure(_))
        ));

        let _ = fs::remove_file(&path);
    }
}
