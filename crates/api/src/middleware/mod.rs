//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, start transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, holds the cart)
//! 5. Rate limiting (governor, verification routes only)
//!
//! Authentication is not a layer: handlers opt in through the
//! [`RequireAuth`] and [`OptionalAuth`] extractors.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth};
pub use rate_limit::verify_rate_limiter;
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
