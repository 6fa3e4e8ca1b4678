//! Timer-driven lifecycle tests for the alert center
//!
//! These run under a paused tokio clock: `advance` moves time precisely,
//! and `settle` yields so freshly spawned timer tasks register their
//! sleeps (or run after being woken) before the next assertion.

use std::time::Duration;

use tokio::time::advance;

use homesrv::alerts::{AlertCenter, NOTIFICATION_TTL, SIMULATION_WINDOW};

async fn settle() {
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn notification_present_at_9999_absent_at_10001() {
    let center = AlertCenter::new();
    center.add_alert("flood").await.unwrap();
    settle().await;

    advance(Duration::from_millis(9_999)).await;
    settle().await;
    assert_eq!(center.notifications().await.len(), 1);

    advance(Duration::from_millis(2)).await;
    settle().await;
    assert!(center.notifications().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn notification_ttl_matches_contract() {
    assert_eq!(NOTIFICATION_TTL, Duration::from_millis(10_000));
}

#[tokio::test(start_paused = true)]
async fn late_timer_does_not_touch_other_notifications() {
    let center = AlertCenter::new();

    let first = center.add_notification("power").await.unwrap();
    settle().await;

    advance(Duration::from_secs(5)).await;
    settle().await;
    let second = center.add_notification("gas").await.unwrap();
    settle().await;

    // Manual dismissal before the first timer fires
    center.remove_notification(&first.id).await;
    assert_eq!(center.notifications().await.len(), 1);

    // First timer's deadline passes harmlessly; the second notification
    // is untouched until its own window ends
    advance(Duration::from_secs(5)).await;
    settle().await;
    let remaining = center.notifications().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);

    advance(Duration::from_secs(5)).await;
    settle().await;
    assert!(center.notifications().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn clear_all_notifications_is_final() {
    let center = AlertCenter::new();
    center.add_notification("fire").await.unwrap();
    center.add_notification("flood").await.unwrap();
    settle().await;

    center.clear_all_notifications().await;
    assert!(center.notifications().await.is_empty());

    // Nothing repopulates the collection after the original windows pass
    advance(Duration::from_secs(30)).await;
    settle().await;
    assert!(center.notifications().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn alerts_are_never_auto_expired() {
    let center = AlertCenter::new();
    center.add_alert("tornado").await.unwrap();
    settle().await;

    // Well past the advisory 30-minute expiry window
    advance(Duration::from_secs(31 * 60)).await;
    settle().await;

    let alerts = center.alerts().await;
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].expires_at > alerts[0].created_at);
}

#[tokio::test(start_paused = true)]
async fn simulation_follows_the_script() {
    let center = AlertCenter::new();
    assert!(center.start_simulation().await);
    settle().await;

    // Nothing before the first offset
    advance(Duration::from_millis(1_999)).await;
    settle().await;
    assert!(center.alerts().await.is_empty());

    advance(Duration::from_millis(1)).await;
    settle().await;
    let alerts = center.alerts().await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].hazard.as_str(), "power");

    advance(Duration::from_secs(6)).await; // +8s
    settle().await;
    assert_eq!(center.alerts().await[0].hazard.as_str(), "flood");

    advance(Duration::from_secs(7)).await; // +15s
    settle().await;
    assert_eq!(center.alerts().await[0].hazard.as_str(), "fire");

    advance(Duration::from_secs(10)).await; // +25s
    settle().await;
    let alerts = center.alerts().await;
    assert_eq!(alerts.len(), 4);
    assert_eq!(alerts[0].hazard.as_str(), "tornado");
    assert!(center.is_simulating());

    // Flag drops at the end of the window; alerts stay
    advance(Duration::from_secs(10)).await; // +35s
    settle().await;
    assert!(!center.is_simulating());
    assert_eq!(center.alerts().await.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn simulation_window_matches_contract() {
    assert_eq!(SIMULATION_WINDOW, Duration::from_secs(35));
}

#[tokio::test(start_paused = true)]
async fn double_start_schedules_one_run() {
    let center = AlertCenter::new();
    assert!(center.start_simulation().await);
    assert!(!center.start_simulation().await);
    settle().await;

    advance(SIMULATION_WINDOW).await;
    settle().await;

    // One set of four scheduled alerts, not eight
    assert_eq!(center.alerts().await.len(), 4);
    assert!(!center.is_simulating());
}

// Deliberate deviation from the reference behavior: scheduled timers are
// tracked and cancelled by clear_all instead of firing against cleared
// state. See DESIGN.md.
#[tokio::test(start_paused = true)]
async fn simulation_cancelled_by_clear_all() {
    let center = AlertCenter::new();
    center.start_simulation().await;
    settle().await;

    advance(Duration::from_secs(3)).await; // power fired at +2s
    settle().await;
    assert_eq!(center.alerts().await.len(), 1);

    center.clear_all().await;
    assert!(!center.is_simulating());
    assert!(center.alerts().await.is_empty());

    // The remaining script entries never fire
    advance(Duration::from_secs(60)).await;
    settle().await;
    assert!(center.alerts().await.is_empty());
    assert!(!center.is_simulating());
}

#[tokio::test(start_paused = true)]
async fn simulation_can_restart_after_clear() {
    let center = AlertCenter::new();
    center.start_simulation().await;
    settle().await;
    center.clear_all().await;

    assert!(center.start_simulation().await);
    settle().await;
    advance(Duration::from_secs(2)).await;
    settle().await;
    assert_eq!(center.alerts().await.len(), 1);
}
