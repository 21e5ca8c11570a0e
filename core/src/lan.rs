// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # LAN Discovery
//!
//! Snapshots the neighbors the kernel already knows about by reading the
//! platform's address-resolution cache (`arp -a`). Purely passive: no
//! frames are sent and no hostnames are resolved.
//!
//! The cache is printed differently on every platform (Linux/BSD prose,
//! Windows columns, single-digit hex bytes on macOS), so entries are
//! extracted with one tolerant pattern instead of per-platform parsers.

use std::net::Ipv4Addr;
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;
use stalkr_common::error::DiscoveryError;
use stalkr_common::models::device::Device;

static NEIGHBOR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn neighbor_pattern() -> &'static Regex {
    NEIGHBOR_PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:\.\d{1,3}){3}).*?\b([0-9A-Fa-f]{1,2}(?:[:-][0-9A-Fa-f]{1,2}){5})\b")
            .expect("neighbor pattern is valid")
    })
}

/// Enumerates the devices currently visible in the neighbor table.
///
/// Fails only when the platform tool itself cannot be run; a cache with
/// no usable entries is an empty snapshot, not an error.
pub fn discover() -> Result<Vec<Device>, DiscoveryError> {
    let table: String = read_neighbor_table("arp")?;
    Ok(parse_neighbor_table(&table))
}

fn read_neighbor_table(program: &str) -> Result<String, DiscoveryError> {
    let output = Command::new(program)
        .arg("-a")
        .output()
        .map_err(|e| DiscoveryError::UnavailablePlatformTool(e.to_string()))?;

    if !output.status.success() {
        let stderr: String = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason: String = if stderr.is_empty() {
            format!("{program} exited with {}", output.status)
        } else {
            stderr
        };
        return Err(DiscoveryError::UnavailablePlatformTool(reason));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extracts IP/hardware-address pairs from raw neighbor-table text.
///
/// Lines without a full pair (headers, `<incomplete>` entries) are
/// skipped silently.
pub fn parse_neighbor_table(table: &str) -> Vec<Device> {
    let mut devices: Vec<Device> = Vec::new();

    for line in table.lines() {
        let Some(caps) = neighbor_pattern().captures(line) else {
            continue;
        };
        let Ok(ip) = caps[1].parse::<Ipv4Addr>() else {
            continue;
        };
        let Some(mac) = normalize_mac(&caps[2]) else {
            continue;
        };
        devices.push(Device::new(ip, mac));
    }

    devices
}

/// Lowercase colon notation with every byte padded to two digits,
/// whatever separator and padding the platform printed.
fn normalize_mac(raw: &str) -> Option<String> {
    let mut bytes: Vec<String> = Vec::with_capacity(6);
    for chunk in raw.split(['-', ':']) {
        let byte: u8 = u8::from_str_radix(chunk, 16).ok()?;
        bytes.push(format!("{byte:02x}"));
    }
    (bytes.len() == 6).then(|| bytes.join(":"))
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
    fn parses_linux_arp_output() {
        let table = "\
? (192.168.1.1) at a4:2b:b0:c3:dd:01 [ether] on wlan0
? (192.168.1.42) at 08:00:27:5e:9f:aa [ether] on wlan0
? (192.168.1.7) at <incomplete> on wlan0";

        let devices = parse_neighbor_table(table);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].ip, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(devices[0].mac, "a4:2b:b0:c3:dd:01");
        assert!(devices[0].hostname.is_none());
    }

    #[test]
    fn parses_windows_arp_output() {
        let table = "\
Interface: 192.168.1.10 --- 0x4
  Internet Address      Physical Address      Type
  192.168.1.1           a4-2b-b0-c3-dd-01     dynamic
  192.168.1.255         ff-ff-ff-ff-ff-ff     static";

        let devices = parse_neighbor_table(table);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].mac, "a4:2b:b0:c3:dd:01");
        assert_eq!(devices[1].mac, "ff:ff:ff:ff:ff:ff");
    }

    #[test]
    fn pads_short_hex_bytes_from_macos() {
        let table = "gateway (10.0.0.1) at 0:1c:b3:9:85:15 on en0 ifscope [ethernet]";

        let devices = parse_neighbor_table(table);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].mac, "00:1c:b3:09:85:15");
    }

    #[test]
    fn skips_entries_with_impossible_addresses() {
        let table = "? (999.168.1.1) at a4:2b:b0:c3:dd:01 [ether] on wlan0";
        assert!(parse_neighbor_table(table).is_empty());
    }

    #[test]
    fn empty_table_is_an_empty_snapshot() {
        assert!(parse_neighbor_table("").is_empty());
    }

    #[test]
    fn missing_platform_tool_reports_unavailable() {
        let result = read_neighbor_table("stalkr-no-such-neighbor-tool");
        assert!(matches!(
            result,
            Err(DiscoveryError::UnavailablePlatformTool(_))
        ));
    }
}
