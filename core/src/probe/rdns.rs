// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Reverse name resolution through the system-configured resolver.
//!
//! An address with no PTR record is a normal outcome, so it settles as
//! a success with no hostname; only resolver/transport trouble fails
//! the slot.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::{Resolver, TokioResolver};
use stalkr_common::error::ProbeError;
use stalkr_common::models::address::Address;
use stalkr_common::models::record::{ProbeKind, ProbeResult, RdnsInfo};

use crate::probe::Probe;

pub struct ReverseDnsProbe;

impl ReverseDnsProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReverseDnsProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for ReverseDnsProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::ReverseDns
    }

    async fn run(&self, target: Address) -> Result<ProbeResult, ProbeError> {
        let resolver: TokioResolver = Resolver::builder_tokio()
            .map_err(|e| ProbeError::TransportFailure(e.to_string()))?
            .build();

        let ip: IpAddr = IpAddr::V4(target.as_ipv4());

        match resolver.reverse_lookup(ip).await {
            Ok(lookup) => {
                let hostname: Option<String> = lookup
                    .iter()
                    .next()
                    .map(|ptr| ptr.to_string().trim_end_matches('.').to_string());
                Ok(ProbeResult::ReverseDns(RdnsInfo { hostname }))
            }
            Err(e) if e.is_no_records_found() => {
                Ok(ProbeResult::ReverseDns(RdnsInfo { hostname: None }))
            }
            Err(e) => Err(ProbeError::TransportFailure(e.to_string())),
        }
    }
}
