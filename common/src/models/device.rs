// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # LAN Device Model
//!
//! One neighbor-table entry: a device the kernel has recently exchanged
//! frames with. Snapshots are per discovery run and never persisted.

use std::net::Ipv4Addr;

/// A device visible on the local network segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// IPv4 address the neighbor table maps.
    pub ip: Ipv4Addr,

    /// Hardware address as reported by the platform, normalized to
    /// lowercase colon notation.
    pub mac: String,

    /// Resolved hostname. Discovery never resolves actively, so this
    /// stays `None` (rendered as "unknown") unless a later enrichment
    /// fills it.
    pub hostname: Option<String>,
}

impl Device {
    pub fn new(ip: Ipv4Addr, mac: String) -> Self {
        Self {
            ip,
            mac,
            hostname: None,
        }
    }
}
