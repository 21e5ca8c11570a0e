// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Geolocation lookup via the ip-api.com JSON endpoint.
//!
//! Only the fields the rest of the tool relies on are decoded; anything
//! the service omits stays "unknown" rather than failing the probe.

use async_trait::async_trait;
use serde::Deserialize;
use stalkr_common::error::ProbeError;
use stalkr_common::models::address::Address;
use stalkr_common::models::record::{GeoInfo, ProbeKind, ProbeResult};

use crate::probe::Probe;

pub struct GeolocationProbe {
    client: reqwest::Client,
    base_url: String,
}

/// Wire shape of the lookup response. The service reports soft failures
/// (reserved ranges, private addresses) with HTTP 200 and
/// `"status": "fail"`, so the status field is part of the contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    country: Option<String>,
    region_name: Option<String>,
    city: Option<String>,
    isp: Option<String>,
}

impl GeolocationProbe {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Probe for GeolocationProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Geolocation
    }

    async fn run(&self, target: Address) -> Result<ProbeResult, ProbeError> {
        let url: String = format!("{}/json/{}", self.base_url, target);

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

        let body: GeoResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::BadResponse(e.to_string()))?;

        if body.status == "fail" {
            let reason = body.message.unwrap_or_else(|| "lookup failed".to_string());
            return Err(ProbeError::BadResponse(reason));
        }

        Ok(ProbeResult::Geolocation(GeoInfo {
            country: body.country,
            region: body.region_name,
            city: body.city,
            isp: body.isp,
        }))
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

    #[test]
    fn response_decodes_partial_fields_as_unknown() {
        let body = r#"{"status":"success","country":"Germany","isp":"Example GmbH"}"#;
        let decoded: GeoResponse = serde_json::from_str(body).unwrap();

        assert_eq!(decoded.status, "success");
        assert_eq!(decoded.country.as_deref(), Some("Germany"));
        assert!(decoded.region_name.is_none());
        assert!(decoded.city.is_none());
    }

    #[test]
    fn response_decodes_service_level_failure() {
        let body = r#"{"status":"fail","message":"private range","query":"192.168.0.1"}"#;
        let decoded: GeoResponse = serde_json::from_str(body).unwrap();

        assert_eq!(decoded.status, "fail");
        assert_eq!(decoded.message.as_deref(), Some("private range"));
    }
}
