//! Showcase dataset over a JSON document
//!
//! The dataset backs the demo dashboard: one JSON file of users, homes,
//! contacts, tasks, alerts and property snapshots. The store is an
//! explicit object handed to request handlers; all read-modify-write
//! cycles, including the file save, run inside a single write-guard
//! scope so concurrent requests cannot interleave against the document.
//!
//! Failures follow the dataset's demo policy: an unreadable or corrupt
//! file degrades to empty collections, and a failed save is logged while
//! the in-memory dataset stays authoritative.

use std::path::PathBuf;

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use common::record_id;
use errors::{HomeguardError, HomeguardResult};

use crate::domain::{
    ContactRecord, HomeInput, HomeRecord, MockDataSet, UserRecord,
};

/// Fallback coordinates used when a home is created without geolocation
const DEFAULT_LATITUDE: f64 = 41.8781;
const DEFAULT_LONGITUDE: f64 = -87.6298;

/// New-user payload for the showcase dataset
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMockUser {
    pub username: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

/// Everything the dashboard needs for one user
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserView {
    pub user: UserRecord,
    pub home: Option<HomeRecord>,
    pub contacts: Vec<ContactRecord>,
    pub tasks: Vec<crate::domain::TaskRecord>,
    pub alerts: Vec<crate::domain::AlertRecord>,
    #[serde(rename = "attomSnapshots")]
    pub attom_snapshots: Vec<crate::domain::AttomSnapshotRecord>,
}

/// File-backed dataset store
pub struct MockStore {
    path: PathBuf,
    data: RwLock<MockDataSet>,
}

impl MockStore {
    /// Load the dataset, degrading to empty collections on any error
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<MockDataSet>(&raw) {
                Ok(data) => {
                    info!(
                        "Loaded dataset from {}: {} users, {} homes",
                        path.display(),
                        data.users.len(),
                        data.homes.len()
                    );
                    data
                },
                Err(e) => {
                    error!("Failed to parse dataset {}: {}", path.display(), e);
                    MockDataSet::default()
                },
            },
            Err(e) => {
                warn!(
                    "Dataset {} not readable ({}), starting empty",
                    path.display(),
                    e
                );
                MockDataSet::default()
            },
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    /// The full dataset
    pub async fn snapshot(&self) -> MockDataSet {
        self.data.read().await.clone()
    }

    /// Everything belonging to one user: their home, contacts, and the
    /// home's tasks, alerts and property snapshots
    pub async fn user_view(&self, user_id: &str) -> HomeguardResult<UserView> {
        let data = self.data.read().await;

        let user = data
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| HomeguardError::not_found(format!("user {}", user_id)))?;

        let home = data.homes.iter().find(|h| h.user_id == user_id).cloned();
        let contacts = data
            .contacts
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();

        let (tasks, alerts, attom_snapshots) = match &home {
            Some(home) => (
                data.tasks
                    .iter()
                    .filter(|t| t.home_id == home.id)
                    .cloned()
                    .collect(),
                data.alerts
                    .iter()
                    .filter(|a| a.home_id == home.id)
                    .cloned()
                    .collect(),
                data.attom_snapshots
                    .iter()
                    .filter(|s| s.home_id == home.id)
                    .cloned()
                    .collect(),
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        Ok(UserView {
            user,
            home,
            contacts,
            tasks,
            alerts,
            attom_snapshots,
        })
    }

    /// Append a new user and persist the dataset
    pub async fn create_user(&self, req: NewMockUser) -> HomeguardResult<UserRecord> {
        if req.username.is_empty()
            || req.display_name.is_empty()
            || req.email.is_empty()
            || req.password.is_empty()
        {
            return Err(HomeguardError::Validation(
                "All fields are required".to_string(),
            ));
        }

        let mut data = self.data.write().await;

        if data
            .users
            .iter()
            .any(|u| u.username == req.username || u.email == req.email)
        {
            return Err(HomeguardError::conflict("Username or email"));
        }

        let user = UserRecord {
            id: record_id("user"),
            username: req.username,
            display_name: req.display_name,
            email: req.email,
            phone_e164: req.phone,
            // Showcase dataset only, not a credential store
            password_hash: format!("mock_hash_{}", req.password),
            created_at: Utc::now(),
            extra: Default::default(),
        };

        data.users.push(user.clone());
        self.persist(&data);

        Ok(user)
    }

    /// Append a new home (and its emergency contact, when given) and
    /// persist the dataset
    pub async fn create_home(
        &self,
        user_id: &str,
        home: &HomeInput,
    ) -> HomeguardResult<HomeRecord> {
        if user_id.is_empty() {
            return Err(HomeguardError::Validation(
                "User ID and home data are required".to_string(),
            ));
        }

        let mut data = self.data.write().await;
        let now = Utc::now();

        let record = HomeRecord {
            id: record_id("home"),
            user_id: user_id.to_string(),
            address_text: home.address.as_line(),
            latitude: home.latitude.unwrap_or(DEFAULT_LATITUDE),
            longitude: home.longitude.unwrap_or(DEFAULT_LONGITUDE),
            building_type: home.building_type.clone(),
            year_built: home.year_built,
            bedrooms: Some(home.household_members.unwrap_or(1).max(1)),
            bathrooms: Some(if home.has_pets { 1.5 } else { 1.0 }),
            has_central_ac: home.laundry_in_unit,
            pets: i64::from(home.has_pets),
            smokers: 0,
            floor: Some("1".to_string()),
            material: Some("brick".to_string()),
            evac_map_path: home.evacuation_plan_image_data_url.clone(),
            created_at: now,
            updated_at: now,
            extra: Default::default(),
        };
        data.homes.push(record.clone());

        if let Some(contact) = &home.emergency_contact {
            data.contacts.push(ContactRecord {
                id: record_id("contact"),
                user_id: user_id.to_string(),
                name: contact.name.clone(),
                phone_e164: Some(contact.phone.clone()),
                relationship: Some("Emergency Contact".to_string()),
                is_primary: true,
                created_at: now,
                extra: Default::default(),
            });
        }

        self.persist(&data);

        Ok(record)
    }

    /// Demo login: both fields are required, but credentials are not
    /// checked — the first seeded user wins. Real credential checks live
    /// in the account service.
    pub async fn demo_login(
        &self,
        username: &str,
        password: &str,
    ) -> HomeguardResult<UserRecord> {
        if username.is_empty() || password.is_empty() {
            return Err(HomeguardError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        self.data
            .read()
            .await
            .users
            .first()
            .cloned()
            .ok_or_else(|| HomeguardError::Unauthorized("No user data available".to_string()))
    }

    /// Write the dataset back to disk. A failed save must not fail the
    /// request; the in-memory dataset stays authoritative.
    fn persist(&self, data: &MockDataSet) {
        match serde_json::to_string_pretty(data) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    warn!("Failed to save dataset {}: {}", self.path.display(), e);
                }
            },
            Err(e) => warn!("Failed to serialize dataset: {}", e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::domain::AddressInput;

    fn new_user(username: &str, email: &str) -> NewMockUser {
        NewMockUser {
            username: username.to_string(),
            display_name: "Test User".to_string(),
            email: email.to_string(),
            phone: Some("+13125550100".to_string()),
            password: "hunter22".to_string(),
        }
    }

    fn home_input() -> HomeInput {
        serde_json::from_value(serde_json::json!({
            "address": {
                "street": "1 Main St",
                "city": "Chicago",
                "state": "IL",
                "postalCode": "60601"
            },
            "buildingType": "house",
            "yearBuilt": 1998,
            "householdMembers": 3,
            "hasPets": true,
            "emergencyContact": {
                "name": "Jo Neighbor",
                "phone": "+13125550101",
                "isPrimary": true
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MockStore::load(dir.path().join("absent.json"));
        assert!(store.snapshot().await.users.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = MockStore::load(&path);
        assert!(store.snapshot().await.users.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = MockStore::load(&path);
        let user = store.create_user(new_user("casey", "c@example.com")).await.unwrap();
        assert!(user.id.starts_with("user_"));
        assert_eq!(user.password_hash, "mock_hash_hunter22");

        // A fresh store sees the saved record
        let reloaded = MockStore::load(&path);
        assert_eq!(reloaded.snapshot().await.users.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_user_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = MockStore::load(dir.path().join("db.json"));

        store.create_user(new_user("casey", "c@example.com")).await.unwrap();
        let err = store
            .create_user(new_user("casey", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_home_defaults_and_contact() {
        let dir = tempfile::tempdir().unwrap();
        let store = MockStore::load(dir.path().join("db.json"));

        let user = store.create_user(new_user("casey", "c@example.com")).await.unwrap();
        let home = store.create_home(&user.id, &home_input()).await.unwrap();

        assert_eq!(home.address_text, "1 Main St, Chicago, IL 60601");
        assert_eq!(home.latitude, DEFAULT_LATITUDE);
        assert_eq!(home.bedrooms, Some(3));
        assert_eq!(home.bathrooms, Some(1.5));
        assert_eq!(home.pets, 1);

        let view = store.user_view(&user.id).await.unwrap();
        assert_eq!(view.home.unwrap().id, home.id);
        assert_eq!(view.contacts.len(), 1);
        assert_eq!(
            view.contacts[0].relationship.as_deref(),
            Some("Emergency Contact")
        );
    }

    #[tokio::test]
    async fn test_user_view_unknown_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = MockStore::load(dir.path().join("db.json"));
        let err = store.user_view("user_0_nobody").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_demo_login_returns_first_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = MockStore::load(dir.path().join("db.json"));

        let err = store.demo_login("anyone", "anything").await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let first = store.create_user(new_user("first", "f@example.com")).await.unwrap();
        store.create_user(new_user("second", "s@example.com")).await.unwrap();

        let user = store.demo_login("whoever", "whatever").await.unwrap();
        assert_eq!(user.id, first.id);
    }

    #[tokio::test]
    async fn test_address_input_camel_case() {
        let address: AddressInput = serde_json::from_value(serde_json::json!({
            "street": "2 Oak Ave",
            "city": "Chicago",
            "state": "IL",
            "postalCode": "60602"
        }))
        .unwrap();
        assert_eq!(address.postal_code, "60602");
    }
}
