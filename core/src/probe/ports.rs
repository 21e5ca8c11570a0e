// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Best-effort TCP reachability sweep.
//!
//! Every port in [`PROBED_PORTS`] is tried concurrently. A port counts
//! as reachable only when its handshake actually completes; refusals,
//! unreachable networks and silence all settle as "not reachable"
//! without failing the sweep.

use std::collections::BTreeSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use stalkr_common::error::ProbeError;
use stalkr_common::models::address::Address;
use stalkr_common::models::record::{PortReport, ProbeKind, ProbeResult};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::probe::Probe;

/// The fixed set of ports every investigation checks.
pub const PROBED_PORTS: [u16; 7] = [80, 443, 21, 22, 23, 3306, 8080];

pub struct PortReachabilityProbe {
    sweep_budget: Duration,
}

impl PortReachabilityProbe {
    pub fn new(sweep_budget: Duration) -> Self {
        Self { sweep_budget }
    }
}

#[async_trait]
impl Probe for PortReachabilityProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::PortReachability
    }

    async fn run(&self, target: Address) -> Result<ProbeResult, ProbeError> {
        let ip: IpAddr = IpAddr::V4(target.as_ipv4());

        // Per-port deadlines sit inside the sweep budget, so a silent
        // port settles as unreachable before the slot itself can time out.
        let per_port: Duration = self.sweep_budget.mul_f64(0.9);

        let mut checks = Vec::with_capacity(PROBED_PORTS.len());
        for port in PROBED_PORTS {
            checks.push((port, tokio::spawn(handshake(ip, port, per_port))));
        }

        let mut reachable: BTreeSet<u16> = BTreeSet::new();
        for (port, handle) in checks {
            if let Ok(true) = handle.await {
                reachable.insert(port);
            }
        }

        Ok(ProbeResult::PortReachability(PortReport { reachable }))
    }
}

/// One bounded connect attempt. Only a completed handshake counts.
async fn handshake(ip: IpAddr, port: u16, limit: Duration) -> bool {
    let socket_addr: SocketAddr = SocketAddr::new(ip, port);
    matches!(
        timeout(limit, TcpStream::connect(socket_addr)).await,
        Ok(Ok(_))
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
