//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PHARMAHUB_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `PHARMAHUB_BASE_URL` - Public URL for the API
//! - `SUPABASE_JWT_SECRET` - HS256 secret used to verify access tokens (high entropy)
//!
//! ## Optional
//! - `PHARMAHUB_HOST` - Bind address (default: 127.0.0.1)
//! - `PHARMAHUB_PORT` - Listen port (default: 3000)
//! - `CHECKOUT_DELIVERY_FEE` - Flat delivery fee in naira (default: 2000)
//! - `CHECKOUT_ESCROW_RATE` - Escrow fraction of the subtotal (default: 0.01)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry performance sampling (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use pharmahub_core::FeeSchedule;
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "super-secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL; `https://` turns on secure cookies
    pub base_url: String,
    /// Secret used to verify Supabase-issued access tokens
    pub jwt_secret: SecretString,
    /// Delivery and escrow fees applied at checkout
    pub fees: FeeSchedule,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
    /// Fraction of requests sent to Sentry as transactions
    pub sentry_traces_sample_rate: f32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the JWT secret fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PHARMAHUB_DATABASE_URL")?;
        let host = parse_env_or_default::<IpAddr>("PHARMAHUB_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("PHARMAHUB_PORT", "3000")?;
        let base_url = get_required_env("PHARMAHUB_BASE_URL")?;
        let jwt_secret = get_validated_secret("SUPABASE_JWT_SECRET")?;
        let fees = fee_schedule_from_env()?;
        let sentry_traces_sample_rate =
            parse_env_or_default::<f32>("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            jwt_secret,
            fees,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn fee_schedule_from_env() -> Result<FeeSchedule, ConfigError> {
    let defaults = FeeSchedule::default();
    let delivery_fee = get_optional_env("CHECKOUT_DELIVERY_FEE")
        .map(|raw| parse_fee("CHECKOUT_DELIVERY_FEE", &raw))
        .transpose()?
        .unwrap_or(defaults.delivery_fee);
    let escrow_rate = get_optional_env("CHECKOUT_ESCROW_RATE")
        .map(|raw| parse_escrow_rate("CHECKOUT_ESCROW_RATE", &raw))
        .transpose()?
        .unwrap_or(defaults.escrow_rate);

    Ok(FeeSchedule {
        delivery_fee,
        escrow_rate,
    })
}

/// Parse a non-negative fee amount.
fn parse_fee(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let fee = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if fee.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(fee)
}

/// Parse an escrow rate in `[0, 1]`.
fn parse_escrow_rate(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let rate = parse_fee(key, raw)?;
    if rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to a default literal.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is long enough, not a placeholder, and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_JWT_SECRET_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the project's generated JWT secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
