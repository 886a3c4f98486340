//! Request extractors that reject through [`AppError`].
//!
//! Axum's own `Json` answers a bad body with 422 and a plain-text serde
//! message. Handlers take [`ApiJson`] instead so every rejection is a 400
//! with the usual `{"error": ...}` body.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body; rejections become [`AppError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
