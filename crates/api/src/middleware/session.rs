//! Session middleware configuration.
//!
//! Sessions hold the buyer's cart. Production uses the `PostgreSQL` store from
//! `tower-sessions-sqlx-store`; tests pass an in-memory store.

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ph_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer around `store`.
///
/// # Arguments
///
/// * `store` - Session store (`PostgresStore` in production)
/// * `secure` - Whether the cookie is restricted to HTTPS
#[must_use]
pub fn create_session_layer<S>(store: S, secure: bool) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
