//! Provider route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::ProviderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Provider;
use crate::state::AppState;

/// The provider account linked to the caller's email.
#[instrument(skip_all, fields(user_id = %principal.user_id))]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<Json<Provider>> {
    let email = principal
        .email
        .ok_or_else(|| AppError::NotFound("No provider account for this user".to_string()))?;

    ProviderRepository::new(state.pool())
        .find_by_email(email.as_str())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No provider account for this user".to_string()))
}
