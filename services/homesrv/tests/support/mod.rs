//! Shared test helpers

use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use common::SqliteClient;
use homesrv::{
    api, AccountService, AlertCenter, AppState, AttomClient, Config, MockStore, ProfileStore,
};

/// Build an AppState over temp files and an in-memory account database
pub async fn test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.storage.database = dir.path().join("homeguard.db").display().to_string();
    config.storage.dataset = dir.path().join("db.json").display().to_string();
    config.storage.profile = dir.path().join("profile.json").display().to_string();

    let db = SqliteClient::in_memory().await.unwrap();
    let accounts = AccountService::new(db);
    accounts.init_schema().await.unwrap();

    let state = AppState {
        alerts: AlertCenter::new(),
        dataset: Arc::new(MockStore::load(&config.storage.dataset)),
        profile: Arc::new(ProfileStore::load(&config.storage.profile)),
        accounts: Arc::new(accounts),
        attom: Arc::new(AttomClient::new(&config.attom).unwrap()),
        config: Arc::new(config),
    };

    (state, dir)
}

/// Router over a fresh test state
#[allow(dead_code)]
pub async fn create_test_router() -> (Router, TempDir) {
    let (state, dir) = test_state().await;
    (api::create_router(state), dir)
}
