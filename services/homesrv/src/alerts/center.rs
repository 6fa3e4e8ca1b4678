//! Alert center: active alerts, popup notifications and the demo sequencer
//!
//! Owns both collections for the life of the process; nothing here is
//! persisted. Active alerts stay until explicitly dismissed (their
//! 30-minute expiry is display-only). Popup notifications are created
//! alongside every alert and auto-dismissed after a fixed window.
//!
//! Every spawned timer handle is tracked so `clear_all` and teardown can
//! cancel scheduled work instead of letting it fire against cleared
//! state. Removal stays idempotent regardless, so a timer that does fire
//! after a manual dismissal finds nothing and changes nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use errors::HomeguardResult;

use crate::domain::hazard;
use crate::domain::{ActiveAlert, HazardProfile, PopupNotification};

/// Display window of a popup notification
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(10_000);

/// Demo sequence: hazard insertions at fixed offsets from the start instant
pub const SIMULATION_SCRIPT: [(u64, &str); 4] =
    [(2, "power"), (8, "flood"), (15, "fire"), (25, "tornado")];

/// The simulation reports itself finished this long after it starts
pub const SIMULATION_WINDOW: Duration = Duration::from_secs(35);

/// In-memory alert state for one service instance
pub struct AlertCenter {
    alerts: RwLock<Vec<ActiveAlert>>,
    notifications: RwLock<Vec<PopupNotification>>,
    simulating: AtomicBool,
    dismiss_timers: Mutex<HashMap<String, JoinHandle<()>>>,
    simulation_timers: Mutex<Vec<JoinHandle<()>>>,
}

impl AlertCenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            alerts: RwLock::new(Vec::new()),
            notifications: RwLock::new(Vec::new()),
            simulating: AtomicBool::new(false),
            dismiss_timers: Mutex::new(HashMap::new()),
            simulation_timers: Mutex::new(Vec::new()),
        })
    }

    // === Active alerts ===

    /// Create an active alert for the given hazard key and trigger its
    /// popup notification. Fails on an unregistered key with no state
    /// change in either collection.
    pub async fn add_alert(self: &Arc<Self>, kind: &str) -> HomeguardResult<ActiveAlert> {
        let profile = hazard::lookup(kind)?;

        let alert = ActiveAlert::from_profile(profile);
        self.alerts.write().await.insert(0, alert.clone());
        info!("Alert raised: {} ({})", alert.headline, alert.id);

        self.push_notification(profile).await;

        Ok(alert)
    }

    /// Dismiss one alert; a missing id is a no-op, not an error
    pub async fn remove_alert(&self, id: &str) {
        let mut alerts = self.alerts.write().await;
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        if alerts.len() < before {
            debug!("Alert dismissed: {}", id);
        }
    }

    /// Empty the active collection and stop any in-flight simulation
    pub async fn clear_all(&self) {
        self.alerts.write().await.clear();
        self.stop_simulation();
        info!("All alerts cleared");
    }

    /// Snapshot of the active alerts, newest first
    pub async fn alerts(&self) -> Vec<ActiveAlert> {
        self.alerts.read().await.clone()
    }

    // === Popup notifications ===

    /// Create a popup notification for the given hazard key. Fails on an
    /// unregistered key with no state change.
    pub async fn add_notification(
        self: &Arc<Self>,
        kind: &str,
    ) -> HomeguardResult<PopupNotification> {
        let profile = hazard::lookup(kind)?;
        Ok(self.push_notification(profile).await)
    }

    async fn push_notification(self: &Arc<Self>, profile: &'static HazardProfile) -> PopupNotification {
        let notification = PopupNotification::from_profile(profile);
        self.notifications
            .write()
            .await
            .insert(0, notification.clone());

        // Auto-dismiss timer; closes over its own id only
        let center = Arc::clone(self);
        let id = notification.id.clone();
        let handle = tokio::spawn(async move {
            sleep(NOTIFICATION_TTL).await;
            center.remove_notification(&id).await;
            center
                .dismiss_timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);
        });
        self.dismiss_timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(notification.id.clone(), handle);

        notification
    }

    /// Dismiss one notification; a missing id is a no-op. Callers may
    /// race the auto-dismiss timer here, both orders are safe.
    pub async fn remove_notification(&self, id: &str) {
        self.notifications.write().await.retain(|n| n.id != id);
    }

    /// Empty the notification collection and cancel pending dismiss timers
    pub async fn clear_all_notifications(&self) {
        self.notifications.write().await.clear();
        let handles: Vec<JoinHandle<()>> = {
            let mut timers = self
                .dismiss_timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            timers.drain().map(|(_, handle)| handle).collect()
        };
        for handle in handles {
            handle.abort();
        }
    }

    /// Snapshot of the popup notifications, newest first
    pub async fn notifications(&self) -> Vec<PopupNotification> {
        self.notifications.read().await.clone()
    }

    // === Simulation sequencer ===

    /// Start the demo sequence. Returns false without scheduling anything
    /// when a run is already in flight, so re-entrant calls cannot
    /// double-schedule.
    pub async fn start_simulation(self: &Arc<Self>) -> bool {
        if self.simulating.swap(true, Ordering::SeqCst) {
            debug!("Simulation already running, start ignored");
            return false;
        }

        let mut timers = self
            .simulation_timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        for (offset, kind) in SIMULATION_SCRIPT {
            let center = Arc::clone(self);
            timers.push(tokio::spawn(async move {
                sleep(Duration::from_secs(offset)).await;
                // Script kinds come from the fixed catalog, this cannot fail
                if let Err(e) = center.add_alert(kind).await {
                    error!("Simulated alert failed: {}", e);
                }
            }));
        }

        let center = Arc::clone(self);
        timers.push(tokio::spawn(async move {
            sleep(SIMULATION_WINDOW).await;
            center.simulating.store(false, Ordering::SeqCst);
            info!("Simulation finished");
        }));

        info!("Simulation started");
        true
    }

    /// Whether a demo sequence is currently in flight
    pub fn is_simulating(&self) -> bool {
        self.simulating.load(Ordering::SeqCst)
    }

    fn stop_simulation(&self) {
        self.simulating.store(false, Ordering::SeqCst);
        let handles: Vec<JoinHandle<()>> = {
            let mut timers = self
                .simulation_timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            timers.drain(..).collect()
        };
        for handle in handles {
            handle.abort();
        }
    }
}

impl Drop for AlertCenter {
    fn drop(&mut self) {
        // Cancel everything still scheduled; state dies with the center
        for (_, handle) in self
            .dismiss_timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
        {
            handle.abort();
        }
        for handle in self
            .simulation_timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
        {
            handle.abort();
        }
    }
}
