//! API request and response models
//!
//! Request fields default to empty so presence checks surface the
//! service's own validation errors instead of body-rejection responses.

use serde::{Deserialize, Serialize};

use common::serde_helpers::deserialize_optional_i64;

use crate::domain::{AddressInput, HomeInput};

/// Health check endpoint response
pub const HEALTH_OK: &str = "OK";

/// Raise-alert request
#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    #[serde(default)]
    pub hazard: String,
}

/// Demo/credential login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Home creation request for the showcase dataset
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMockHomeRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub home_data: Option<HomeInput>,
}

/// Home creation request for the account database
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomeRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub home_data: Option<HomeInput>,
}

/// Property lookup request
#[derive(Debug, Deserialize)]
pub struct AttomLookupRequest {
    #[serde(default)]
    pub address: Option<AddressInput>,
}

/// Local session login request
#[derive(Debug, Deserialize)]
pub struct SessionLoginRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: String,
    pub status: String,
    pub active_alerts: usize,
    pub notifications: usize,
    pub simulating: bool,
}
