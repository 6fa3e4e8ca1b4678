//! Local profile store and session flag
//!
//! Holds the single locally persisted household profile (identity plus
//! credentials) and the logged-in flag, in one JSON file. Login checks
//! the submitted identifier and password against the stored profile:
//! identifiers containing `@` compare against the email
//! (case-insensitive, trimmed), anything else compares digits-only
//! against the phone number. An absent or unreadable file simply means
//! no profile is stored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::{AddressInput, PropertyDetails};

/// How the household wants to be notified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPreference {
    Email,
    Sms,
    Both,
}

/// The locally persisted household profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub notification_preference: NotificationPreference,
    pub address: AddressInput,
    pub household_members: i64,
    pub has_pets: bool,
    pub laundry_in_unit: bool,
    pub has_dishwasher: bool,
    #[serde(default)]
    pub evacuation_plan_image_data_url: Option<String>,
    #[serde(default)]
    pub property_details: Option<PropertyDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profile: Option<Profile>,
    #[serde(default)]
    logged_in: bool,
}

/// File-backed profile store
pub struct ProfileStore {
    path: PathBuf,
    state: RwLock<ProfileFile>,
}

impl ProfileStore {
    /// Load the store; an absent or unparseable file means no profile
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self {
            path,
            state: RwLock::new(state),
        }
    }

    /// The stored profile, if any
    pub async fn stored_profile(&self) -> Option<Profile> {
        self.state.read().await.profile.clone()
    }

    /// Replace the stored profile
    pub async fn save_profile(&self, profile: Profile) {
        let mut state = self.state.write().await;
        state.profile = Some(profile);
        self.persist(&state);
    }

    /// Remove the stored profile and the session flag
    pub async fn clear_profile(&self) {
        let mut state = self.state.write().await;
        state.profile = None;
        state.logged_in = false;
        self.persist(&state);
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.logged_in
    }

    pub async fn set_logged_in(&self, logged_in: bool) {
        let mut state = self.state.write().await;
        state.logged_in = logged_in;
        self.persist(&state);
    }

    pub async fn logout(&self) {
        self.set_logged_in(false).await;
    }

    /// Validate a login attempt against the stored profile. On success
    /// the session flag is persisted true.
    pub async fn login(&self, identifier: &str, password: &str) -> bool {
        let mut state = self.state.write().await;
        let Some(profile) = state.profile.as_ref() else {
            return false;
        };

        let cleaned = identifier.trim().to_lowercase();
        let id_match = if cleaned.contains('@') {
            cleaned == profile.email.trim().to_lowercase()
        } else {
            let submitted = digits(&cleaned);
            !submitted.is_empty() && submitted == digits(&profile.phone)
        };
        let pass_match = profile.password == password;

        if id_match && pass_match {
            state.logged_in = true;
            self.persist(&state);
            true
        } else {
            false
        }
    }

    fn persist(&self, state: &ProfileFile) {
        match serde_json::to_string_pretty(state) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    warn!("Failed to save profile {}: {}", self.path.display(), e);
                }
            },
            Err(e) => warn!("Failed to serialize profile: {}", e),
        }
    }
}

fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
