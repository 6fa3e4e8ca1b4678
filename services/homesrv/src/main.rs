//! Home Service (HomeSrv)
//!
//! Home-safety backend: emergency alerts with popup notifications and a
//! demo sequencer, the showcase dataset, account management and property
//! lookups.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use common::{shutdown, SqliteClient};
use homesrv::{
    api, AccountService, AlertCenter, AppState, AttomClient, Config, MockStore, ProfileStore,
    SERVICE_NAME, SERVICE_VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    info!("Starting {} v{}...", SERVICE_NAME, SERVICE_VERSION);

    let config = Config::load()?;
    let port = config.service.port;

    let db = SqliteClient::new(&config.storage.database).await?;
    let accounts = AccountService::new(db);
    accounts.init_schema().await?;

    let dataset = MockStore::load(&config.storage.dataset);
    let profile = ProfileStore::load(&config.storage.profile);
    let attom = AttomClient::new(&config.attom)?;

    let state = AppState {
        config: Arc::new(config),
        alerts: AlertCenter::new(),
        dataset: Arc::new(dataset),
        profile: Arc::new(profile),
        accounts: Arc::new(accounts),
        attom: Arc::new(attom),
    };

    let app = api::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("{} started on {}", SERVICE_NAME, addr);
    info!("API endpoints:");
    info!("  GET /health - Health check");
    info!("  GET/POST/DELETE /api/alerts - Emergency alert management");
    info!("  POST /api/simulation - Demo alert sequence");
    info!("  GET /api/mock/data - Showcase dataset");
    info!("  POST /api/auth/register - Account registration");
    info!("  POST /api/attom/property - Property lookup");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_shutdown())
        .await?;

    info!("{} stopped", SERVICE_NAME);
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
