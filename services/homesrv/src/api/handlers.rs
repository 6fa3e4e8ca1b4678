//! API handlers for the home-safety service

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use common::SuccessResponse;
use errors::{HomeguardError, HomeguardResult};

use crate::accounts::RegisterInput;
use crate::api::models::*;
use crate::domain::{ActiveAlert, MockDataSet, PopupNotification};
use crate::profile::Profile;
use crate::store::{NewMockUser, UserView};
use crate::AppState;

// === Health & Status ===

/// Health check endpoint
pub async fn health_check() -> &'static str {
    HEALTH_OK
}

/// Configurable ping endpoint
pub async fn ping(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": state.config.service.ping_message }))
}

/// Get system status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: crate::SERVICE_NAME.to_string(),
        status: "running".to_string(),
        active_alerts: state.alerts.alerts().await.len(),
        notifications: state.alerts.notifications().await.len(),
        simulating: state.alerts.is_simulating(),
    })
}

// === Emergency Alerts ===

/// List active alerts, newest first
pub async fn list_alerts(State(state): State<AppState>) -> Json<SuccessResponse<Vec<ActiveAlert>>> {
    Json(SuccessResponse::new(state.alerts.alerts().await))
}

/// Raise a new alert (and its popup notification)
pub async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>,
) -> HomeguardResult<Json<SuccessResponse<ActiveAlert>>> {
    let alert = state.alerts.add_alert(&request.hazard).await?;
    Ok(Json(SuccessResponse::new(alert)))
}

/// Dismiss one alert; unknown ids succeed
pub async fn dismiss_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Value> {
    state.alerts.remove_alert(&id).await;
    Json(json!({ "success": true, "id": id }))
}

/// Clear all alerts and stop any running simulation
pub async fn clear_alerts(State(state): State<AppState>) -> Json<Value> {
    state.alerts.clear_all().await;
    Json(json!({ "success": true }))
}

/// List popup notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Json<SuccessResponse<Vec<PopupNotification>>> {
    Json(SuccessResponse::new(state.alerts.notifications().await))
}

/// Dismiss one notification; unknown ids succeed
pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Value> {
    state.alerts.remove_notification(&id).await;
    Json(json!({ "success": true, "id": id }))
}

/// Clear all popup notifications
pub async fn clear_notifications(State(state): State<AppState>) -> Json<Value> {
    state.alerts.clear_all_notifications().await;
    Json(json!({ "success": true }))
}

/// Start the demo simulation; re-entrant calls report started=false
pub async fn start_simulation(State(state): State<AppState>) -> Json<Value> {
    let started = state.alerts.start_simulation().await;
    Json(json!({
        "success": true,
        "started": started,
        "simulating": state.alerts.is_simulating(),
    }))
}

// === Property Lookup ===

/// Look up property details for an address, falling back to mock data
pub async fn attom_lookup(
    State(state): State<AppState>,
    Json(request): Json<AttomLookupRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(address) = request.address else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ok": false,
                "details": null,
                "error": "Missing address in request body",
            })),
        );
    };

    let details = state.attom.lookup(&address).await;
    (StatusCode::OK, Json(json!({ "ok": true, "details": details })))
}

// === Showcase Dataset ===

/// The full dataset
pub async fn get_mock_data(
    State(state): State<AppState>,
) -> Json<SuccessResponse<MockDataSet>> {
    Json(SuccessResponse::new(state.dataset.snapshot().await))
}

/// Everything belonging to one user
pub async fn get_mock_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HomeguardResult<Json<SuccessResponse<UserView>>> {
    let view = state.dataset.user_view(&user_id).await?;
    Ok(Json(SuccessResponse::new(view)))
}

/// Create a dataset user
pub async fn create_mock_user(
    State(state): State<AppState>,
    Json(request): Json<NewMockUser>,
) -> HomeguardResult<Json<Value>> {
    let user = state.dataset.create_user(request).await?;
    Ok(Json(json!({
        "success": true,
        "userId": user.id,
        "message": "User created successfully",
    })))
}

/// Create a dataset home (and optional emergency contact)
pub async fn create_mock_home(
    State(state): State<AppState>,
    Json(request): Json<CreateMockHomeRequest>,
) -> HomeguardResult<Json<Value>> {
    let (Some(user_id), Some(home_data)) = (request.user_id, request.home_data) else {
        return Err(HomeguardError::Validation(
            "User ID and home data are required".to_string(),
        ));
    };

    let home = state.dataset.create_home(&user_id, &home_data).await?;
    Ok(Json(json!({
        "success": true,
        "homeId": home.id,
        "message": "Home created successfully",
    })))
}

/// Demo login: first seeded user wins, credentials are not checked
pub async fn mock_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HomeguardResult<Json<Value>> {
    let user = state
        .dataset
        .demo_login(&request.username, &request.password)
        .await?;
    Ok(Json(json!({
        "success": true,
        "userId": user.id,
        "user": {
            "id": user.id,
            "username": user.username,
            "display_name": user.display_name,
            "email": user.email,
            "phone": user.phone_e164,
        },
        "message": "Login successful",
    })))
}

// === Accounts ===

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> HomeguardResult<Json<Value>> {
    let user_id = state
        .accounts
        .register(RegisterInput {
            username: request.username,
            display_name: request.display_name,
            phone: request.phone,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "userId": user_id.to_string(),
        "message": "User registered successfully",
    })))
}

/// Credential login against the account database
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HomeguardResult<Json<Value>> {
    let profile = state
        .accounts
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(json!({
        "success": true,
        "user": profile,
        "message": "Login successful",
    })))
}

/// Check whether a username is still free
pub async fn check_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> HomeguardResult<Json<Value>> {
    let available = state.accounts.username_available(&username).await?;
    Ok(Json(json!({
        "success": true,
        "available": available,
        "message": if available { "Username is available" } else { "Username is taken" },
    })))
}

/// Create a home profile in the account database
pub async fn create_home(
    State(state): State<AppState>,
    Json(request): Json<CreateHomeRequest>,
) -> HomeguardResult<Json<Value>> {
    let (Some(user_id), Some(home_data)) = (request.user_id, request.home_data) else {
        return Err(HomeguardError::Validation(
            "User ID and home data are required".to_string(),
        ));
    };

    let home_id = state.accounts.create_home(user_id, &home_data).await?;
    Ok(Json(json!({
        "success": true,
        "homeId": home_id.to_string(),
        "message": "Home profile created successfully",
    })))
}

/// Full profile for one account
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> HomeguardResult<Json<Value>> {
    let profile = state.accounts.user_profile(user_id).await?;
    Ok(Json(json!({ "success": true, "user": profile })))
}

// === Local Session ===

/// The stored profile and session flag
pub async fn get_session(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "loggedIn": state.profile.is_logged_in().await,
        "profile": state.profile.stored_profile().await,
    }))
}

/// Replace the stored profile
pub async fn save_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Json<Value> {
    state.profile.save_profile(profile).await;
    Json(json!({ "success": true, "message": "Profile saved" }))
}

/// Remove the stored profile along with the session flag
pub async fn clear_profile(State(state): State<AppState>) -> Json<Value> {
    state.profile.clear_profile().await;
    Json(json!({ "success": true, "message": "Profile removed" }))
}

/// Log in against the stored profile
pub async fn session_login(
    State(state): State<AppState>,
    Json(request): Json<SessionLoginRequest>,
) -> HomeguardResult<Json<Value>> {
    if state
        .profile
        .login(&request.identifier, &request.password)
        .await
    {
        Ok(Json(json!({ "success": true, "message": "Login successful" })))
    } else {
        Err(HomeguardError::Unauthorized(
            "Invalid identifier or password".to_string(),
        ))
    }
}

/// Drop the session flag
pub async fn session_logout(State(state): State<AppState>) -> Json<Value> {
    state.profile.logout().await;
    Json(json!({ "success": true }))
}
