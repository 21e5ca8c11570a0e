// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Probe Capabilities
//!
//! One probe is one independent network query against one target:
//! - **Geolocation**: location/ISP fields from an HTTP lookup service.
//! - **Reverse DNS**: PTR resolution through the system resolver.
//! - **Reputation**: opaque abuse-report document from an HTTP service.
//! - **Port Reachability**: concurrent TCP handshakes against a fixed
//!   port set.
//!
//! Probes share one contract, [`Probe`]: they settle with a typed
//! payload or a typed failure and never throw past their slot. Deadlines
//! are owned by the aggregator, which wraps every `run` call in a
//! timeout; a probe only has to avoid blocking forever on its own.

use async_trait::async_trait;
use stalkr_common::config::Config;
use stalkr_common::error::ProbeError;
use stalkr_common::models::address::Address;
use stalkr_common::models::record::{ProbeKind, ProbeResult};

mod geo;
mod ports;
mod rdns;
mod reputation;

pub use ports::PROBED_PORTS;

use geo::GeolocationProbe;
use ports::PortReachabilityProbe;
use rdns::ReverseDnsProbe;
use reputation::ReputationProbe;

/// A single network query against one target.
///
/// Implementations report every failure as a value; the returned
/// [`ProbeResult`] always matches [`Probe::kind`].
#[async_trait]
pub trait Probe: Send + Sync {
    fn kind(&self) -> ProbeKind;

    async fn run(&self, target: Address) -> Result<ProbeResult, ProbeError>;
}

/// Builds the full capability set for one investigation.
///
/// The HTTP-backed probes share one client; endpoints and the port-sweep
/// budget come from `cfg`.
pub fn capability_set(cfg: &Config) -> anyhow::Result<Vec<Box<dyn Probe>>> {
    // The client-level timeout is only a backstop; slot deadlines and
    // their classification belong to the aggregator, so this one must
    // never fire first.
    let client = reqwest::Client::builder()
        .timeout(cfg.probe_timeout.saturating_mul(2))
        .build()?;

    Ok(vec![
        Box::new(GeolocationProbe::new(client.clone(), &cfg.geo_api)),
        Box::new(ReverseDnsProbe::new()),
        Box::new(ReputationProbe::new(client, &cfg.reputation_api)),
        Box::new(PortReachabilityProbe::new(cfg.probe_timeout)),
    ])
}
