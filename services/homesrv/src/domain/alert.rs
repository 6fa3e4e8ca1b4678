//! Active alerts and popup notifications
//!
//! Both carry the display fields copied from the catalog at creation
//! time; later catalog changes never affect records already created.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use common::record_id;

use super::hazard::{HazardKind, HazardProfile, Severity};

/// Advisory lifetime of an active alert. Display-only: nothing purges an
/// alert when the window elapses; dismissal is always explicit.
pub const ALERT_EXPIRY_MINUTES: i64 = 30;

/// Persistent emergency banner, visible until explicitly dismissed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveAlert {
    pub id: String,
    pub hazard: HazardKind,
    pub severity: Severity,
    pub headline: String,
    pub description: String,
    pub instruction: String,
    pub icon: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    /// Advisory only, see [`ALERT_EXPIRY_MINUTES`]
    pub expires_at: DateTime<Utc>,
}

impl ActiveAlert {
    /// Create a new alert from a catalog profile
    pub fn from_profile(profile: &HazardProfile) -> Self {
        let now = Utc::now();
        Self {
            id: record_id("alert"),
            hazard: profile.kind,
            severity: profile.severity,
            headline: profile.headline.to_string(),
            description: profile.description.to_string(),
            instruction: profile.instruction.to_string(),
            icon: profile.icon.to_string(),
            color: profile.color_token.to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(ALERT_EXPIRY_MINUTES),
        }
    }
}

/// Transient toast paired 1:1 with an alert's creation, auto-dismissed
/// by the notification manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupNotification {
    pub id: String,
    pub hazard: HazardKind,
    pub severity: Severity,
    pub headline: String,
    pub description: String,
    pub instruction: String,
    pub icon: String,
    pub color: String,
    pub timestamp: DateTime<Utc>,
}

impl PopupNotification {
    /// Create a new notification from a catalog profile; the id is
    /// independent of any associated alert's id
    pub fn from_profile(profile: &HazardProfile) -> Self {
        Self {
            id: record_id("notification"),
            hazard: profile.kind,
            severity: profile.severity,
            headline: profile.headline.to_string(),
            description: profile.description.to_string(),
            instruction: profile.instruction.to_string(),
            icon: profile.icon.to_string(),
            color: profile.color_token.to_string(),
            timestamp: Utc::now(),
        }
    }
}
