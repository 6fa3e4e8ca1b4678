//! Home Service Library
//!
//! This module exports the public API for the home-safety service.

pub mod accounts;
pub mod alerts;
pub mod api;
pub mod attom;
pub mod config;
pub mod domain;
pub mod profile;
pub mod store;

pub use accounts::AccountService;
pub use alerts::AlertCenter;
pub use attom::AttomClient;
pub use config::Config;
pub use profile::ProfileStore;
pub use store::MockStore;

/// Service name used in logs and status responses
pub const SERVICE_NAME: &str = "homesrv";
/// Service version
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: std::sync::Arc<Config>,
    pub alerts: std::sync::Arc<AlertCenter>,
    pub dataset: std::sync::Arc<MockStore>,
    pub profile: std::sync::Arc<ProfileStore>,
    pub accounts: std::sync::Arc<AccountService>,
    pub attom: std::sync::Arc<AttomClient>,
}
