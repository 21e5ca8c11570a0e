// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Target Address Model
//!
//! Defines [`Address`], the validated IPv4 target of an investigation.
//!
//! Probes only ever accept an `Address`, never a raw string, so the
//! syntactic check happens exactly once, before anything is scheduled.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated IPv4 literal.
///
/// Immutable once constructed; the only way in is [`Address::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Ipv4Addr);

impl Address {
    /// Checks that `raw` is exactly four dot-separated decimal octets,
    /// each in [0, 255], with no surrounding characters.
    ///
    /// Pure and I/O-free. IPv6 literals, hostnames and anything else
    /// fall out as [`ValidationError::MalformedAddress`].
    pub fn validate(raw: &str) -> Result<Address, ValidationError> {
        let reject = || ValidationError::MalformedAddress(raw.to_string());

        let mut octets: [u8; 4] = [0; 4];
        let mut seen: usize = 0;

        for part in raw.split('.') {
            if seen == 4 {
                return Err(reject());
            }
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(reject());
            }
            let value: u16 = part.parse().map_err(|_| reject())?;
            if value > 255 {
                return Err(reject());
            }
            octets[seen] = value as u8;
            seen += 1;
        }

        if seen != 4 {
            return Err(reject());
        }

        Ok(Address(Ipv4Addr::from(octets)))
    }

    pub fn as_ipv4(&self) -> Ipv4Addr {
        self.0
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_plain_quad() {
        let addr = Address::validate("8.8.8.8").unwrap();
        assert_eq!(addr.as_ipv4(), Ipv4Addr::new(8, 8, 8, 8));
    }

    #[test]
    fn test_accepts_boundary_octets() {
        assert!(Address::validate("0.0.0.0").is_ok());
        assert!(Address::validate("255.255.255.255").is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_octet() {
        assert!(Address::validate("256.1.1.1").is_err());
        assert!(Address::validate("1.1.1.999").is_err());
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        assert!(Address::validate("1.2.3").is_err());
        assert!(Address::validate("1.2.3.4.5").is_err());
        assert!(Address::validate("").is_err());
    }

    #[test]
    fn test_rejects_surrounding_characters() {
        assert!(Address::validate(" 8.8.8.8").is_err());
        assert!(Address::validate("8.8.8.8 ").is_err());
        assert!(Address::validate("8.8.8.8/24").is_err());
    }

    #[test]
    fn test_rejects_ipv6_and_hostnames() {
        assert!(Address::validate("::1").is_err());
        assert!(Address::validate("2001:db8::1").is_err());
        assert!(Address::validate("dns.google").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let addr = Address::validate("192.168.0.100").unwrap();
        assert_eq!(addr.to_string(), "192.168.0.100");
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let addr = Address::validate("10.0.0.1").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"10.0.0.1\"");
    }

    proptest! {
        #[test]
        fn any_four_octets_validate(a: u8, b: u8, c: u8, d: u8) {
            let raw = format!("{a}.{b}.{c}.{d}");
            let addr = Address::validate(&raw).unwrap();
            prop_assert_eq!(addr.as_ipv4(), Ipv4Addr::new(a, b, c, d));
        }

        #[test]
        fn five_segments_never_validate(a: u8, b: u8, c: u8, d: u8, e: u8) {
            let raw = format!("{a}.{b}.{c}.{d}.{e}");
            prop_assert!(Address::validate(&raw).is_err());
        }
    }
}
