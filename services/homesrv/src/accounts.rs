//! Account service over SQLite
//!
//! Registration, credential login and home-profile rows live in the
//! service database; the showcase dataset in `store` is a separate,
//! file-backed world. Passwords are stored as salted SHA-256 digests in
//! `salt$digest` form, both parts base64.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::FromRow;
use tracing::info;

use common::SqliteClient;
use errors::{HomeguardError, HomeguardResult};

use crate::domain::HomeInput;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

const USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        phone_e164 TEXT,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const HOMES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS homes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        address_text TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        building_type TEXT,
        year_built INTEGER,
        has_central_ac INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CONTACTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        home_id INTEGER NOT NULL REFERENCES homes(id),
        name TEXT NOT NULL,
        phone_e164 TEXT,
        relationship TEXT,
        is_primary INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
}

/// Account row without the credential digest
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub phone_e164: Option<String>,
    pub email: String,
    pub created_at: String,
}

/// Home row
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HomeRow {
    pub id: i64,
    pub user_id: i64,
    pub address_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub building_type: Option<String>,
    pub year_built: Option<i64>,
    pub has_central_ac: bool,
    pub created_at: String,
}

/// Contact row
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactRow {
    pub id: i64,
    pub home_id: i64,
    pub name: String,
    pub phone_e164: Option<String>,
    pub relationship: Option<String>,
    pub is_primary: bool,
    pub created_at: String,
}

/// A home together with its contacts
#[derive(Debug, Clone, Serialize)]
pub struct HomeWithContacts {
    #[serde(flatten)]
    pub home: HomeRow,
    pub contacts: Vec<ContactRow>,
}

/// Account plus homes, the login/profile response shape
#[derive(Debug, Clone, Serialize)]
pub struct AccountProfile {
    #[serde(flatten)]
    pub account: Account,
    pub homes: Vec<HomeWithContacts>,
}

#[derive(Debug, Clone, FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    display_name: String,
    phone_e164: Option<String>,
    email: String,
    password_hash: String,
    created_at: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            display_name: row.display_name,
            phone_e164: row.phone_e164,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

/// SQLite-backed account service
pub struct AccountService {
    db: SqliteClient,
}

impl AccountService {
    pub fn new(db: SqliteClient) -> Self {
        Self { db }
    }

    /// Apply the schema; safe to run on every startup
    pub async fn init_schema(&self) -> HomeguardResult<()> {
        for ddl in [USERS_TABLE, HOMES_TABLE, CONTACTS_TABLE] {
            sqlx::query(ddl).execute(self.db.pool()).await?;
        }
        info!("Account schema ready at {}", self.db.path());
        Ok(())
    }

    /// Register a new account, returning its id
    pub async fn register(&self, input: RegisterInput) -> HomeguardResult<i64> {
        if input.username.is_empty()
            || input.display_name.is_empty()
            || input.email.is_empty()
            || input.password.is_empty()
        {
            return Err(HomeguardError::Validation(
                "Username, display name, email, and password are required".to_string(),
            ));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(HomeguardError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE username = ? OR email = ?")
                .bind(&input.username)
                .bind(&input.email)
                .fetch_optional(self.db.pool())
                .await?;
        if existing.is_some() {
            return Err(HomeguardError::conflict("Username or email"));
        }

        let result = sqlx::query(
            "INSERT INTO users (username, display_name, phone_e164, email, password_hash) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&input.username)
        .bind(&input.display_name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(hash_password(&input.password))
        .execute(self.db.pool())
        .await?;

        let user_id = result.last_insert_rowid();
        info!("Registered account {} ({})", input.username, user_id);
        Ok(user_id)
    }

    /// Credential login; the identifier matches username or email. The
    /// same error covers an unknown identifier and a wrong password.
    pub async fn login(&self, identifier: &str, password: &str) -> HomeguardResult<AccountProfile> {
        if identifier.is_empty() || password.is_empty() {
            return Err(HomeguardError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let row: Option<AccountRow> =
            sqlx::query_as("SELECT * FROM users WHERE username = ? OR email = ?")
                .bind(identifier)
                .bind(identifier)
                .fetch_optional(self.db.pool())
                .await?;

        let row = row.ok_or_else(invalid_credentials)?;
        if !verify_password(password, &row.password_hash) {
            return Err(invalid_credentials());
        }

        let homes = self.homes_with_contacts(row.id).await?;
        Ok(AccountProfile {
            account: row.into(),
            homes,
        })
    }

    /// Whether a username is still free
    pub async fn username_available(&self, username: &str) -> HomeguardResult<bool> {
        if username.is_empty() {
            return Err(HomeguardError::Validation(
                "Username is required".to_string(),
            ));
        }
        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(existing.is_none())
    }

    /// Insert a home and its emergency contact in one transaction
    pub async fn create_home(&self, user_id: i64, home: &HomeInput) -> HomeguardResult<i64> {
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO homes (user_id, address_text, latitude, longitude, building_type, \
             year_built, has_central_ac) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(home.address.as_line())
        .bind(home.latitude)
        .bind(home.longitude)
        .bind(&home.building_type)
        .bind(home.year_built)
        .bind(false)
        .execute(&mut *tx)
        .await?;
        let home_id = result.last_insert_rowid();

        if let Some(contact) = &home.emergency_contact {
            sqlx::query(
                "INSERT INTO contacts (home_id, name, phone_e164, relationship, is_primary) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(home_id)
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind("Emergency Contact")
            .bind(contact.is_primary)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("Created home {} for user {}", home_id, user_id);
        Ok(home_id)
    }

    /// Full profile for one account
    pub async fn user_profile(&self, user_id: i64) -> HomeguardResult<AccountProfile> {
        let row: Option<AccountRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;
        let row = row.ok_or_else(|| HomeguardError::not_found(format!("user {}", user_id)))?;

        let homes = self.homes_with_contacts(row.id).await?;
        Ok(AccountProfile {
            account: row.into(),
            homes,
        })
    }

    async fn homes_with_contacts(&self, user_id: i64) -> HomeguardResult<Vec<HomeWithContacts>> {
        let homes: Vec<HomeRow> = sqlx::query_as("SELECT * FROM homes WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;

        let mut out = Vec::with_capacity(homes.len());
        for home in homes {
            let contacts: Vec<ContactRow> =
                sqlx::query_as("SELECT * FROM contacts WHERE home_id = ?")
                    .bind(home.id)
                    .fetch_all(self.db.pool())
                    .await?;
            out.push(HomeWithContacts { home, contacts });
        }
        Ok(out)
    }
}

fn invalid_credentials() -> HomeguardError {
    HomeguardError::Unauthorized("Invalid username or password".to_string())
}

// === Credential digests ===

fn digest_with_salt(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// Salted digest in `salt$digest` form
fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    format!(
        "{}${}",
        BASE64.encode(salt),
        BASE64.encode(digest_with_salt(&salt, password))
    )
}

fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (BASE64.decode(salt_b64), BASE64.decode(digest_b64)) else {
        return false;
    };
    digest_with_salt(&salt, password) == expected
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    async fn test_service() -> AccountService {
        let db = SqliteClient::in_memory().await.unwrap();
        let service = AccountService::new(db);
        service.init_schema().await.unwrap();
        service
    }

    fn register_input(username: &str, email: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_string(),
            display_name: "Casey".to_string(),
            phone: Some("+13125550100".to_string()),
            email: email.to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_password_digest_roundtrip() {
        let stored = hash_password("hunter22");
        assert!(verify_password("hunter22", &stored));
        assert!(!verify_password("hunter23", &stored));
        // Fresh salt per digest
        assert_ne!(stored, hash_password("hunter22"));
    }

    #[test]
    fn test_verify_rejects_malformed_digest() {
        assert!(!verify_password("x", "no-separator"));
        assert!(!verify_password("x", "!bad$base64!"));
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let service = test_service().await;
        let id = service
            .register(register_input("casey", "c@example.com"))
            .await
            .unwrap();
        assert!(id > 0);

        let profile = service.login("casey", "hunter22").await.unwrap();
        assert_eq!(profile.account.id, id);
        assert!(profile.homes.is_empty());

        // Email works as the identifier too
        let profile = service.login("c@example.com", "hunter22").await.unwrap();
        assert_eq!(profile.account.username, "casey");
    }

    #[tokio::test]
    async fn test_login_failures_share_one_error() {
        let service = test_service().await;
        service
            .register(register_input("casey", "c@example.com"))
            .await
            .unwrap();

        let wrong_pass = service.login("casey", "wrong!").await.unwrap_err();
        let wrong_user = service.login("nobody", "hunter22").await.unwrap_err();
        assert_eq!(wrong_pass.to_string(), wrong_user.to_string());
        assert_eq!(wrong_pass.status_code(), 401);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let service = test_service().await;

        let mut short = register_input("casey", "c@example.com");
        short.password = "abc".to_string();
        assert_eq!(service.register(short).await.unwrap_err().status_code(), 400);

        let empty = register_input("", "c@example.com");
        assert_eq!(service.register(empty).await.unwrap_err().status_code(), 400);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let service = test_service().await;
        service
            .register(register_input("casey", "c@example.com"))
            .await
            .unwrap();
        let err = service
            .register(register_input("casey", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_username_availability() {
        let service = test_service().await;
        assert!(service.username_available("casey").await.unwrap());
        service
            .register(register_input("casey", "c@example.com"))
            .await
            .unwrap();
        assert!(!service.username_available("casey").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_home_with_contact() {
        let service = test_service().await;
        let user_id = service
            .register(register_input("casey", "c@example.com"))
            .await
            .unwrap();

        let home: HomeInput = serde_json::from_value(serde_json::json!({
            "address": {
                "street": "1 Main St",
                "city": "Chicago",
                "state": "IL",
                "postalCode": "60601"
            },
            "buildingType": "house",
            "yearBuilt": 1998,
            "emergencyContact": {
                "name": "Jo Neighbor",
                "phone": "+13125550101",
                "isPrimary": true
            }
        }))
        .unwrap();

        let home_id = service.create_home(user_id, &home).await.unwrap();
        assert!(home_id > 0);

        let profile = service.user_profile(user_id).await.unwrap();
        assert_eq!(profile.homes.len(), 1);
        assert_eq!(profile.homes[0].home.address_text, "1 Main St, Chicago, IL 60601");
        assert_eq!(profile.homes[0].contacts.len(), 1);
        assert!(profile.homes[0].contacts[0].is_primary);
    }

    #[tokio::test]
    async fn test_user_profile_unknown_user() {
        let service = test_service().await;
        let err = service.user_profile(4242).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
