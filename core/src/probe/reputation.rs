// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Abuse/reputation lookup.
//!
//! The provider's document format (HTML or JSON, depending on service)
//! is not ours to parse. Only the transport and status line are checked
//! here; the body travels through the record verbatim.

use async_trait::async_trait;
use stalkr_common::error::ProbeError;
use stalkr_common::models::address::Address;
use stalkr_common::models::record::{ProbeKind, ProbeResult, ReputationReport};

use crate::probe::Probe;

pub struct ReputationProbe {
    client: reqwest::Client,
    base_url: String,
}

impl ReputationProbe {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Probe for ReputationProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Reputation
    }

    async fn run(&self, target: Address) -> Result<ProbeResult, ProbeError> {
        let url: String = format!("{}/{}", self.base_url, target);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProbeError::TransportFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::BadResponse(format!("HTTP {status}")));
        }

        let document: String = response
            .text()
            .await
            .map_err(|e| ProbeError::BadResponse(e.to_string()))?;

        Ok(ProbeResult::Reputation(ReputationReport { document }))
    }
}
