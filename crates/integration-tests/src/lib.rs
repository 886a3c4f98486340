//! Integration tests for PharmaHub.
//!
//! These tests talk to a running API over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and seed a database, then start the API
//! cargo run -p pharmahub-cli -- migrate
//! cargo run -p pharmahub-api
//!
//! # Run integration tests
//! cargo test -p pharmahub-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `PHARMAHUB_TEST_URL` - API base URL (default: `http://localhost:3000`)
//! - `PHARMAHUB_DATABASE_URL` / `DATABASE_URL` - Same database as the API, for seeding
//! - `SUPABASE_JWT_SECRET` - Same secret as the API, for signing access tokens
//! - `PHARMAHUB_TEST_NAFDAC_CODE` - A code known to be in the catalog
//! - `PHARMAHUB_TEST_LISTING_ID` - A `supplier_products` ID to put in carts

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use reqwest::Client;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Base URL for the API under test.
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("PHARMAHUB_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client that keeps the session cookie between requests, like a browser.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Read a fixture the test cannot run without.
///
/// # Panics
///
/// Panics if the variable is unset or blank.
#[must_use]
pub fn required_fixture(name: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| panic!("{name} must be set to run this test"))
}

/// Connect to the API's database for seeding and cleanup.
///
/// # Panics
///
/// Panics if no database URL is set or the connection fails.
pub async fn database() -> PgPool {
    let url = std::env::var("PHARMAHUB_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("PHARMAHUB_DATABASE_URL or DATABASE_URL must be set to run this test");
    PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database")
}

/// Sign an access token for `email` the way Supabase would.
///
/// # Panics
///
/// Panics if `SUPABASE_JWT_SECRET` is unset or signing fails.
#[must_use]
pub fn access_token(email: &str) -> String {
    let secret = required_fixture("SUPABASE_JWT_SECRET");
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
        + 3600;
    let claims = json!({
        "sub": Uuid::new_v4(),
        "email": email,
        "role": "authenticated",
        "aud": "authenticated",
        "exp": exp,
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign access token")
}

/// Email unique to one test run, so seeded rows never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@pharmahub.test", Uuid::new_v4().simple())
}
