// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Error Taxonomy
//!
//! Every fallible layer of the tool owns a dedicated error enum, so a
//! caller can tell a rejected input from a dead upstream service from a
//! broken history file without string matching.
//!
//! None of these are process-fatal: validation errors abort a single
//! investigation, probe errors settle into the record they belong to,
//! and discovery/store errors are reported alongside whatever data was
//! still computed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection of a raw target string before any probe is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input is not four dot-separated decimal octets in [0, 255].
    #[error("malformed IPv4 address: '{0}'")]
    MalformedAddress(String),
}

/// Failure of a single probe. Stored inside the investigation record,
/// never propagated past the slot it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ProbeError {
    /// The upstream service could not be reached at all.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// The upstream service answered, but with a non-2xx status or a
    /// body the probe could not make sense of.
    #[error("bad response: {0}")]
    BadResponse(String),

    /// The probe did not settle within its time budget.
    #[error("probe timed out")]
    Timeout,
}

/// Failure to read the local neighbor table.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The platform facility exposing the address-resolution cache
    /// could not be invoked (missing binary, denied, non-zero exit).
    #[error("neighbor table unavailable: {0}")]
    UnavailablePlatformTool(String),
}

/// Failure of the tracked-IP store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be durably committed. The in-memory record
    /// survives; only persistence is lost.
    #[error("failed to commit record: {0}")]
    WriteFailure(String),

    /// The history file exists but could not be read or parsed.
    #[error("failed to read store: {0}")]
    ReadFailure(String),
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

    #[test]
    fn validation_error_displays_offending_input() {
        let err = ValidationError::MalformedAddress("999.1.1.1".to_string());
        assert_eq!(err.to_string(), "malformed IPv4 address: '999.1.1.1'");
    }

    #[test]
    fn probe_error_round_trips_through_json() {
        let original = ProbeError::BadResponse("HTTP 503".to_string());
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: ProbeError = serde_json::from_str(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn timeout_display_is_stable() {
        assert_eq!(ProbeError::Timeout.to_string(), "probe timed out");
    }
}
