//! Property detail lookup
//!
//! Asks the upstream property API for bedroom/bathroom estimates for an
//! address. The demo must keep working without a key or upstream, so
//! every failure path — unconfigured key, non-success status, transport
//! or parse error — degrades to fixed mock details with the reason
//! recorded in `raw`.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::{json, Value};
use tracing::warn;

use errors::{HomeguardError, HomeguardResult};

use crate::config::AttomConfig;
use crate::domain::{AddressInput, PropertyDetails, PropertySource};

/// Fallback details returned whenever the upstream cannot be used
fn mock_details(reason: &str) -> PropertyDetails {
    PropertyDetails {
        bedrooms: Some(3.0),
        bathrooms: Some(2.5),
        latitude: Some(41.8781),
        longitude: Some(-87.6298),
        building_type: Some("house".to_string()),
        year_built: Some(2020),
        source: PropertySource::Mock,
        raw: Some(json!({ "reason": reason })),
    }
}

/// Upstream property API client
pub struct AttomClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl AttomClient {
    pub fn new(config: &AttomConfig) -> HomeguardResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up property details; never fails, see the module docs
    pub async fn lookup(&self, address: &AddressInput) -> PropertyDetails {
        let Some(key) = self.api_key.clone() else {
            return mock_details("property API key not configured");
        };

        match self.fetch(&key, address).await {
            Ok(details) => details,
            Err(e) => {
                warn!("Property lookup failed, serving mock details: {}", e);
                mock_details(&e.to_string())
            },
        }
    }

    async fn fetch(&self, key: &str, address: &AddressInput) -> HomeguardResult<PropertyDetails> {
        let url = format!("{}/property/detail", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("address", address.as_line())])
            .header(ACCEPT, "application/json")
            .header("apikey", key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HomeguardError::ExternalService {
                service: "attom".to_string(),
                message: format!("request failed with status {}", status.as_u16()),
            });
        }

        let body: Value = response.json().await?;
        Ok(extract_details(&body))
    }
}

/// Mine the upstream response tolerantly; anything missing becomes null
fn extract_details(body: &Value) -> PropertyDetails {
    let first = body
        .get("property")
        .and_then(|p| p.get(0).or(Some(p)))
        .or_else(|| body.get(0))
        .unwrap_or(body);

    let bedrooms = first
        .pointer("/building/rooms/beds")
        .or_else(|| first.pointer("/summary/beds"))
        .and_then(Value::as_f64);
    let bathrooms = first
        .pointer("/building/rooms/bathstotal")
        .or_else(|| first.pointer("/summary/baths"))
        .and_then(Value::as_f64);
    let latitude = first.pointer("/location/latitude").and_then(Value::as_f64);
    let longitude = first.pointer("/location/longitude").and_then(Value::as_f64);
    let building_type = first
        .pointer("/summary/proptype")
        .or_else(|| first.pointer("/summary/propertyType"))
        .and_then(Value::as_str)
        .map(|s| s.to_lowercase())
        .or_else(|| Some("house".to_string()));
    let year_built = first
        .pointer("/summary/yearbuilt")
        .or_else(|| first.pointer("/building/yearBuilt"))
        .and_then(Value::as_i64)
        .map(|y| y as i32);

    PropertyDetails {
        bedrooms,
        bathrooms,
        latitude,
        longitude,
        building_type,
        year_built,
        source: PropertySource::Attom,
        raw: Some(first.clone()),
    }
}
