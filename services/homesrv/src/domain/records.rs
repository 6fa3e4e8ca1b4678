//! Typed records for the showcase dataset and request payloads
//!
//! The dataset file is hand-seeded, so every record keeps unrecognized
//! fields in a flattened `extra` map and round-trips them on save.
//! Fields the service actually reads or writes are typed explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use common::serde_helpers::deserialize_bool_flexible;

/// The full showcase dataset as persisted in the JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockDataSet {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub homes: Vec<HomeRecord>,
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub task_completions: Vec<TaskCompletionRecord>,
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,
    #[serde(default)]
    pub attom_snapshots: Vec<AttomSnapshotRecord>,
}

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_e164: Option<String>,
    pub password_hash: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Household profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeRecord {
    pub id: String,
    pub user_id: String,
    pub address_text: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub building_type: Option<String>,
    #[serde(default)]
    pub year_built: Option<i32>,
    #[serde(default)]
    pub bedrooms: Option<i64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_bool_flexible")]
    pub has_central_ac: bool,
    #[serde(default)]
    pub pets: i64,
    #[serde(default)]
    pub smokers: i64,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub evac_map_path: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Emergency contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub phone_e164: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_flexible")]
    pub is_primary: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Maintenance task attached to a home
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub home_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Completion entry for a maintenance task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCompletionRecord {
    pub id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Persisted per-home alert row (distinct from the in-memory active alerts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub home_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cached property snapshot from an earlier lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttomSnapshotRecord {
    pub id: String,
    pub home_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Request payload types
// ============================================================================

/// Street address as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl AddressInput {
    /// Single-line rendering used for stored records and upstream lookups
    pub fn as_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.postal_code
        )
    }
}

/// Emergency contact as submitted alongside a home profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactInput {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Home profile as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeInput {
    pub address: AddressInput,
    #[serde(default)]
    pub building_type: Option<String>,
    #[serde(default)]
    pub year_built: Option<i32>,
    #[serde(default)]
    pub household_members: Option<i64>,
    #[serde(default)]
    pub has_pets: bool,
    #[serde(default)]
    pub laundry_in_unit: bool,
    #[serde(default)]
    pub has_dishwasher: bool,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContactInput>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub evacuation_plan_image_data_url: Option<String>,
}

// ============================================================================
// Property details
// ============================================================================

/// Where a set of property details came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertySource {
    Attom,
    Mock,
    Manual,
}

/// Property details from the upstream lookup or the mock fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub building_type: Option<String>,
    pub year_built: Option<i32>,
    pub source: PropertySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}
