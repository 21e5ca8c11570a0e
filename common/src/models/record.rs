// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Investigation Record Model
//!
//! This module defines the unit of persistence: one full round of probes
//! against one target, merged into a single [`InvestigationRecord`].
//!
//! ## Key Concepts
//! * **Settled Slots**: A record always carries one [`ProbeResult`] per
//!   [`ProbeKind`] — a success payload or a failure marker, never a gap.
//!   A record with every slot failed is still a valid, storable result.
//! * **Immutability**: Records are assembled once, after every probe has
//!   settled, and never mutated afterwards. Late probe completions are
//!   discarded by the aggregator, not patched in.
//! * **Opaque Reputation**: The abuse-report payload is pass-through; its
//!   schema belongs to the external service and is not parsed here.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProbeError;
use crate::models::address::Address;

/// The four independent queries run against a target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ProbeKind {
    Geolocation,
    ReverseDns,
    Reputation,
    PortReachability,
}

impl ProbeKind {
    /// Canonical slot order of a record.
    pub const ALL: [ProbeKind; 4] = [
        ProbeKind::Geolocation,
        ProbeKind::ReverseDns,
        ProbeKind::Reputation,
        ProbeKind::PortReachability,
    ];
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProbeKind::Geolocation => "geolocation",
            ProbeKind::ReverseDns => "reverse dns",
            ProbeKind::Reputation => "reputation",
            ProbeKind::PortReachability => "port reachability",
        };
        f.write_str(label)
    }
}

/// Location fields reported by the geolocation service.
///
/// Every field is optional; the service omitting one means "unknown",
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub isp: Option<String>,
}

/// Outcome of the reverse name lookup.
///
/// `hostname: None` means the lookup worked and found no PTR record,
/// which is a success, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdnsInfo {
    pub hostname: Option<String>,
}

/// Raw abuse-report document, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationReport {
    pub document: String,
}

/// Ports that answered a TCP handshake within the sweep budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortReport {
    pub reachable: BTreeSet<u16>,
}

/// One settled probe: a typed success payload or a tagged failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbeResult {
    Geolocation(GeoInfo),
    ReverseDns(RdnsInfo),
    Reputation(ReputationReport),
    PortReachability(PortReport),
    Failure { kind: ProbeKind, error: ProbeError },
}

impl ProbeResult {
    pub fn kind(&self) -> ProbeKind {
        match self {
            ProbeResult::Geolocation(_) => ProbeKind::Geolocation,
            ProbeResult::ReverseDns(_) => ProbeKind::ReverseDns,
            ProbeResult::Reputation(_) => ProbeKind::Reputation,
            ProbeResult::PortReachability(_) => ProbeKind::PortReachability,
            ProbeResult::Failure { kind, .. } => *kind,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProbeResult::Failure { .. })
    }

    /// The failure classification, if this slot failed.
    pub fn error(&self) -> Option<&ProbeError> {
        match self {
            ProbeResult::Failure { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// One persisted investigation: target, start time, four settled slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationRecord {
    pub target: Address,
    pub started_at: DateTime<Utc>,
    results: Vec<ProbeResult>,
}

impl InvestigationRecord {
    /// Assembles a record from settled results, fixing slot order to
    /// [`ProbeKind::ALL`] regardless of which probe finished first.
    pub fn new(
        target: Address,
        started_at: DateTime<Utc>,
        mut results: Vec<ProbeResult>,
    ) -> Self {
        results.sort_by_key(ProbeResult::kind);
        debug_assert_eq!(results.len(), ProbeKind::ALL.len());
        Self {
            target,
            started_at,
            results,
        }
    }

    /// The settled slots in canonical order.
    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    /// Looks up the slot for one probe kind.
    ///
    /// Always present on records built by the aggregator; `None` can only
    /// appear on hand-edited history files.
    pub fn result_for(&self, kind: ProbeKind) -> Option<&ProbeResult> {
        self.results.iter().find(|result| result.kind() == kind)
    }

    pub fn failed_slots(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
