//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while authenticating a request.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("missing bearer token")]
    MissingToken,

    /// The `Authorization` header is not `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedHeader,

    /// Token signature, audience or claims are invalid.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Token is well-formed but past its expiry.
    #[error("token expired")]
    Expired,
}
