//! Authentication service.
//!
//! Buyers and suppliers sign in through Supabase; this service only verifies
//! the access tokens Supabase issues (HS256, audience `authenticated`) and
//! turns them into a [`Principal`].

mod error;

pub use error::AuthError;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pharmahub_core::Email;

/// Audience Supabase puts on tokens for signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims read from a Supabase access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: u64,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: Option<Email>,
    pub role: String,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        let email = claims.email.as_deref().and_then(|raw| {
            Email::parse(raw)
                .map_err(|e| tracing::warn!(user_id = %claims.sub, error = %e, "Token carries invalid email"))
                .ok()
        });

        Self {
            user_id: claims.sub,
            email,
            role: claims.role,
        }
    }
}

/// Verifies bearer tokens against the project's JWT secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("key", &"[REDACTED]")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl TokenVerifier {
    /// Create a verifier for HS256 tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Verify a raw token and return the caller.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Expired` for expired tokens and
    /// `AuthError::InvalidToken` for any other verification failure.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                AuthError::Expired
            } else {
                AuthError::InvalidToken(e)
            }
        })?;

        Ok(data.claims.into())
    }

    /// Verify the value of an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MalformedHeader` unless the value is
    /// `Bearer <token>`, otherwise the errors of [`Self::verify`].
    pub fn verify_header(&self, header: &str) -> Result<Principal, AuthError> {
        let token = bearer_token(header).ok_or(AuthError::MalformedHeader)?;
        self.verify(token)
    }
}

/// Extract the token from `Bearer <token>` (scheme is case-insensitive).
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
