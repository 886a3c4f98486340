//! Authentication extractors.
//!
//! Callers authenticate with a Supabase access token in the `Authorization`
//! header. Handlers that need a caller take [`RequireAuth`]; handlers that
//! merely personalize take [`OptionalAuth`].

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::services::auth::{AuthError, Principal};
use crate::state::AppState;

/// Extractor that requires a valid access token.
///
/// Missing, malformed, expired or forged tokens are rejected with 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(principal): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", principal.user_id)
/// }
/// ```
pub struct RequireAuth(pub Principal);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(parts, state).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Unauthorized(rejection_message(&e).to_string())
        })?;

        set_sentry_user(
            &principal.user_id,
            principal.email.as_ref().map(pharmahub_core::Email::as_str),
        );

        Ok(Self(principal))
    }
}

/// Extractor that optionally authenticates the caller.
///
/// Unlike `RequireAuth`, this never rejects. An absent or invalid token
/// yields `None`.
pub struct OptionalAuth(pub Option<Principal>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(authenticate(parts, state).ok()))
    }
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<Principal, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    state.verifier().verify_header(header)
}

const fn rejection_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingToken => "Authentication required",
        AuthError::Expired => "Access token expired",
        AuthError::MalformedHeader | AuthError::InvalidToken(_) => "Invalid access token",
    }
}
