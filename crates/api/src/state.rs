//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use pharmahub_core::FeeSchedule;

use crate::config::ApiConfig;
use crate::services::auth::TokenVerifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    verifier: TokenVerifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let verifier = TokenVerifier::new(&config.jwt_secret);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                verifier,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the access token verifier.
    #[must_use]
    pub fn verifier(&self) -> &TokenVerifier {
        &self.inner.verifier
    }

    /// Fee schedule used for checkout quotes.
    #[must_use]
    pub fn fees(&self) -> &FeeSchedule {
        &self.inner.config.fees
    }
}
