// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use stalkr_common::config::Config;
use stalkr_common::error::{ProbeError, ValidationError};
use stalkr_common::models::address::Address;
use stalkr_common::models::record::{
    GeoInfo, InvestigationRecord, PortReport, ProbeKind, ProbeResult, RdnsInfo, ReputationReport,
};
use stalkr_core::store::TrackedStore;
use stalkr_core::tracker;

use crate::support;

fn test_config(geo_api: String, reputation_api: String, store_tag: &str) -> Config {
    Config {
        no_banner: true,
        quiet: 0,
        probe_timeout: Duration::from_millis(1500),
        store_path: support::scratch_store_path(store_tag),
        geo_api,
        reputation_api,
    }
}

fn open_clean_store(cfg: &Config) -> TrackedStore {
    let _ = fs::remove_file(&cfg.store_path);
    TrackedStore::open(&cfg.store_path).unwrap()
}

fn synthetic_record(last_octet: u8) -> InvestigationRecord {
    let target = Address::validate(&format!("203.0.113.{last_octet}")).unwrap();
    InvestigationRecord::new(
        target,
        Utc::now(),
        vec![
            ProbeResult::Geolocation(GeoInfo::default()),
            ProbeResult::ReverseDns(RdnsInfo::default()),
            ProbeResult::Reputation(ReputationReport::default()),
            ProbeResult::PortReachability(PortReport::default()),
        ],
    )
}

#[tokio::test]
async fn investigation_settles_all_four_slots_and_appends_once() {
    let geo_body = concat!(
        r#"{"status":"success","country":"United States","regionName":"Virginia","#,
        r#""city":"Ashburn","isp":"Google LLC","query":"8.8.8.8"}"#
    )
    .to_string();
    let geo_api = support::spawn_http_stub("HTTP/1.1 200 OK", "application/json", geo_body).await;
    let reputation_api = support::spawn_http_stub(
        "HTTP/1.1 200 OK",
        "text/html",
        "<html>no abuse reports</html>".to_string(),
    )
    .await;

    let cfg = test_config(geo_api, reputation_api, "full");
    let store = open_clean_store(&cfg);

    let outcome = tracker::investigate("127.0.0.1", &cfg, &store).await.unwrap();
    assert!(outcome.persistence.is_ok());

    let record = &outcome.record;
    for kind in ProbeKind::ALL {
        assert!(record.result_for(kind).is_some(), "missing slot: {kind}");
    }

    match record.result_for(ProbeKind::Geolocation).unwrap() {
        ProbeResult::Geolocation(info) => {
            assert_eq!(info.country.as_deref(), Some("United States"));
            assert_eq!(info.region.as_deref(), Some("Virginia"));
            assert_eq!(info.city.as_deref(), Some("Ashburn"));
            assert_eq!(info.isp.as_deref(), Some("Google LLC"));
        }
        other => panic!("geolocation slot did not succeed: {other:?}"),
    }

    match record.result_for(ProbeKind::Reputation).unwrap() {
        ProbeResult::Reputation(report) => {
            assert!(report.document.contains("no abuse reports"));
        }
        other => panic!("reputation slot did not succeed: {other:?}"),
    }

    assert!(matches!(
        record.result_for(ProbeKind::PortReachability).unwrap(),
        ProbeResult::PortReachability(_)
    ));

    // Exactly one append.
    let persisted = store.list_all().unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].target.to_string(), "127.0.0.1");

    let _ = fs::remove_file(&cfg.store_path);
}

#[tokio::test]
async fn one_stalled_probe_times_out_without_delaying_siblings() {
    let stalling_geo = support::spawn_stalling_stub().await;
    let reputation_api = support::spawn_http_stub(
        "HTTP/1.1 200 OK",
        "text/html",
        "<html>clean</html>".to_string(),
    )
    .await;

    let mut cfg = test_config(stalling_geo, reputation_api, "stall");
    cfg.probe_timeout = Duration::from_millis(600);
    let store = open_clean_store(&cfg);

    let started = Instant::now();
    let outcome = tracker::investigate("127.0.0.1", &cfg, &store).await.unwrap();
    let elapsed = started.elapsed();

    // Probes run side by side, so one hanging upstream costs one
    // budget, not four.
    assert!(
        elapsed < Duration::from_secs(5),
        "fan-out took too long: {elapsed:?}"
    );

    let record = &outcome.record;
    assert!(matches!(
        record.result_for(ProbeKind::Geolocation).unwrap(),
        ProbeResult::Failure {
            error: ProbeError::Timeout,
            ..
        }
    ));

    // Siblings settled on their own terms.
    assert!(matches!(
        record.result_for(ProbeKind::Reputation).unwrap(),
        ProbeResult::Reputation(_)
    ));
    assert!(matches!(
        record.result_for(ProbeKind::PortReachability).unwrap(),
        ProbeResult::PortReachability(_)
    ));
    assert!(record.result_for(ProbeKind::ReverseDns).is_some());

    // The record still counts as a result and is persisted once.
    assert_eq!(store.list_all().unwrap().len(), 1);

    let _ = fs::remove_file(&cfg.store_path);
}

#[tokio::test]
async fn malformed_target_is_rejected_and_never_persisted() {
    let cfg = test_config(
        "http://127.0.0.1:9".to_string(),
        "http://127.0.0.1:9".to_string(),
        "reject",
    );
    let store = open_clean_store(&cfg);

    let outcome = tracker::investigate("not-an-ip", &cfg, &store).await;
    assert!(matches!(
        outcome,
        Err(ValidationError::MalformedAddress(_))
    ));

    assert!(store.list_all().unwrap().is_empty());

    let _ = fs::remove_file(&cfg.store_path);
}

#[tokio::test]
async fn history_preserves_insertion_order() {
    let cfg = test_config(String::new(), String::new(), "order");
    let store = open_clean_store(&cfg);

    for octet in 1..=8u8 {
        store.append(&synthetic_record(octet)).await.unwrap();
    }

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 8);
    for (idx, record) in listed.iter().enumerate() {
        assert_eq!(record.target.to_string(), format!("203.0.113.{}", idx + 1));
    }

    let _ = fs::remove_file(&cfg.store_path);
}

#[tokio::test]
async fn concurrent_reads_never_observe_torn_records() {
    const TOTAL: usize = 20;

    let cfg = test_config(String::new(), String::new(), "torn");
    let store = Arc::new(open_clean_store(&cfg));

    let writer_store = Arc::clone(&store);
    let writer = tokio::spawn(async move {
        for octet in 1..=TOTAL as u8 {
            writer_store.append(&synthetic_record(octet)).await.unwrap();
        }
    });

    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        assert!(Instant::now() < deadline, "writer never finished");

        // Every snapshot must parse cleanly and contain only complete
        // four-slot records, however far the writer has come.
        let snapshot = store.list_all().unwrap();
        for record in &snapshot {
            assert_eq!(record.results().len(), 4);
        }

        if snapshot.len() == TOTAL {
            break;
        }
        tokio::task::yield_now().await;
    }

    writer.await.unwrap();
    let _ = fs::remove_file(&cfg.store_path);
}
