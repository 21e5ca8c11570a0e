// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Probe Aggregation
//!
//! Orchestrates one investigation: validate the target, fan the four
//! probes out concurrently, wait for every one of them to settle, merge
//! the outcomes into a single record and append it to the history.
//!
//! ### Guarantees
//! - **Explicit join point**: the record is assembled only after all
//!   four slots have settled; a probe finishing late is abandoned by its
//!   timeout wrapper and can never patch a finalized record.
//! - **Failure containment**: a dead upstream, a panicked task or an
//!   elapsed deadline settles exactly one slot; siblings are untouched.
//! - **Exactly one append**: the record reaches the store once, and a
//!   persistence failure is reported next to the record instead of
//!   erasing it.
//!
//! Retrying is deliberately left to the caller: re-invoking
//! [`investigate`] is the retry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use stalkr_common::config::Config;
use stalkr_common::error::{ProbeError, StoreError, ValidationError};
use stalkr_common::models::address::Address;
use stalkr_common::models::record::{InvestigationRecord, ProbeKind, ProbeResult};
use stalkr_common::{debug, error, info};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::probe::{self, Probe};
use crate::store::TrackedStore;

static SETTLED_PROBE_COUNT: AtomicUsize = AtomicUsize::new(0);

fn mark_settled() {
    SETTLED_PROBE_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Live number of settled probes in the current investigation, for the
/// CLI status line.
pub fn get_settled_count() -> usize {
    SETTLED_PROBE_COUNT.load(Ordering::Relaxed)
}

/// The result of one investigation: the merged record plus whether it
/// reached durable storage.
#[derive(Debug)]
pub struct InvestigationOutcome {
    pub record: InvestigationRecord,
    pub persistence: Result<(), StoreError>,
}

/// Runs one full investigation against `raw`.
///
/// A malformed target is rejected before anything is scheduled or
/// persisted. Otherwise the call always produces a record — even one
/// with every slot failed — and appends it to `store` exactly once.
pub async fn investigate(
    raw: &str,
    cfg: &Config,
    store: &TrackedStore,
) -> Result<InvestigationOutcome, ValidationError> {
    let target: Address = Address::validate(raw)?;
    let started_at: DateTime<Utc> = Utc::now();
    SETTLED_PROBE_COUNT.store(0, Ordering::Relaxed);

    info!("Investigating {target}");

    let results: Vec<ProbeResult> = match probe::capability_set(cfg) {
        Ok(probes) => fan_out(probes, target, cfg.probe_timeout).await,
        // No client, no probes: settle every slot as failed rather than
        // aborting the investigation.
        Err(e) => {
            error!("Probe setup failed: {e}");
            ProbeKind::ALL
                .iter()
                .map(|kind| ProbeResult::Failure {
                    kind: *kind,
                    error: ProbeError::TransportFailure(e.to_string()),
                })
                .collect()
        }
    };

    let record = InvestigationRecord::new(target, started_at, results);

    let persistence: Result<(), StoreError> = store.append(&record).await;
    if let Err(ref e) = persistence {
        error!("History not updated: {e}");
    } else {
        debug!("Record for {target} appended to history");
    }

    Ok(InvestigationOutcome {
        record,
        persistence,
    })
}

/// Launches every probe on its own task and collects all of them.
async fn fan_out(
    probes: Vec<Box<dyn Probe>>,
    target: Address,
    budget: Duration,
) -> Vec<ProbeResult> {
    let mut handles: Vec<(ProbeKind, JoinHandle<ProbeResult>)> =
        Vec::with_capacity(probes.len());

    for probe in probes {
        let kind: ProbeKind = probe.kind();
        handles.push((kind, tokio::spawn(run_bounded(probe, target, budget))));
    }

    let mut results: Vec<ProbeResult> = Vec::with_capacity(handles.len());
    for (kind, handle) in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                error!("{kind} probe task died: {e}");
                mark_settled();
                results.push(ProbeResult::Failure {
                    kind,
                    error: ProbeError::TransportFailure(format!("probe task died: {e}")),
                });
            }
        }
    }

    results
}

/// Runs one probe under the shared per-probe deadline.
async fn run_bounded(probe: Box<dyn Probe>, target: Address, budget: Duration) -> ProbeResult {
    let kind: ProbeKind = probe.kind();

    let settled: ProbeResult = match timeout(budget, probe.run(target)).await {
        Ok(Ok(result)) => result,
        Ok(Err(error)) => ProbeResult::Failure { kind, error },
        Err(_elapsed) => ProbeResult::Failure {
            kind,
            error: ProbeError::Timeout,
        },
    };

    debug!("{kind} settled");
    mark_settled();
    settled
}

#[derive(Debug, Deserialize)]
struct SelfLookup {
    query: String,
}

/// Asks the geolocation service which public address this host appears
/// as, for `track` invocations without an explicit target.
pub async fn detect_public_address(cfg: &Config) -> anyhow::Result<Address> {
    use anyhow::Context;

    let client = reqwest::Client::builder()
        .timeout(cfg.probe_timeout)
        .build()?;
    let url: String = format!("{}/json/", cfg.geo_api.trim_end_matches('/'));

    let response = client
        .get(&url)
        .send()
        .await
        .context("reaching the geolocation service")?;
    anyhow::ensure!(
        response.status().is_success(),
        "public address lookup answered HTTP {}",
        response.status()
    );

    let body: SelfLookup = response
        .json()
        .await
        .context("decoding the public address lookup")?;

    let own: Address = Address::validate(&body.query)?;
    info!("Public address detected as {own}");
    Ok(own)
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
    use std::fs;
    use std::path::PathBuf;

    fn scratch_store(tag: &str) -> (TrackedStore, PathBuf) {
        let path: PathBuf =
            std::env::temp_dir().join(format!("stalkr-tracker-{tag}-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        (TrackedStore::open(&path).unwrap(), path)
    }

    #[tokio::test]
    async fn malformed_target_schedules_and_persists_nothing() {
        let (store, path) = scratch_store("reject");
        let cfg = Config::default();

        let outcome = investigate("not-an-ip", &cfg, &store).await;
        assert!(matches!(
            outcome,
            Err(ValidationError::MalformedAddress(_))
        ));
        assert!(store.list_all().unwrap().is_empty());

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn ipv6_target_is_rejected_up_front() {
        let (store, path) = scratch_store("v6");
        let cfg = Config::default();

        assert!(investigate("::1", &cfg, &store).await.is_err());

        let _ = fs::remove_file(&path);
    }
}
