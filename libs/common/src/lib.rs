//! HomeGuard basic library
//!
//! Provides basic functions shared by all services, including:
//! - API response envelopes
//! - SQLite client
//! - record id generation
//! - graceful shutdown handling

pub mod api_types;
pub mod ident;
pub mod serde_helpers;
pub mod shutdown;
pub mod sqlite;

// Re-export commonly used API types
pub use api_types::{ErrorResponse, SuccessResponse};

pub use ident::record_id;
pub use sqlite::{SqliteClient, SqlitePool};

// Re-export common dependencies
pub use anyhow;
pub use serde;
pub use serde_json;
pub use tokio;
