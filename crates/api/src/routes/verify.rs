//! NAFDAC verification lookup.
//!
//! Both forms answer 200 with a `status` of `verified` or `unverified`. Only a
//! blank or oversized code is rejected.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use pharmahub_core::{NafdacCode, VerificationOutcome};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::OptionalAuth;
use crate::services::auth::Principal;
use crate::state::AppState;

/// `?code=` query or `{"code": ...}` body.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// `GET /api/verify?code=...`
#[instrument(skip(state, caller))]
pub async fn verify_query(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    Query(request): Query<VerifyRequest>,
) -> Result<Json<VerificationOutcome>> {
    lookup(&state, caller.as_ref(), request).await.map(Json)
}

/// `POST /api/verify`
#[instrument(skip(state, caller))]
pub async fn verify_body(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> Result<Json<VerificationOutcome>> {
    lookup(&state, caller.as_ref(), request).await.map(Json)
}

async fn lookup(
    state: &AppState,
    caller: Option<&Principal>,
    request: VerifyRequest,
) -> Result<VerificationOutcome> {
    let code = NafdacCode::parse(request.code.as_deref().unwrap_or_default())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let record = ProductRepository::new(state.pool()).verify(&code).await?;
    let outcome = VerificationOutcome::from_lookup(&code, record);

    tracing::info!(
        code = %code,
        verified = outcome.is_verified(),
        user_id = caller.map(|p| tracing::field::display(p.user_id)),
        "Verification lookup"
    );
    Ok(outcome)
}
