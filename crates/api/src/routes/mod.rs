//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Liveness
//! GET    /health/ready                  - Readiness (database ping)
//!
//! # Verification (rate limited per client IP)
//! GET    /api/verify?code=...           - NAFDAC lookup
//! POST   /api/verify                    - NAFDAC lookup, JSON body
//!
//! # Catalog
//! GET    /api/products?q=&limit=        - Search
//! GET    /api/products/{id}             - Product detail
//!
//! # Suppliers
//! GET    /api/suppliers                 - Directory
//! GET    /api/suppliers/me              - Caller's supplier account (auth)
//! GET    /api/suppliers/{id}            - Supplier detail
//! GET    /api/suppliers/{id}/products   - Supplier listings
//! POST   /api/supplier-products         - Create listing (auth, supplier)
//! PATCH  /api/supplier-products/{id}    - Update listing (auth, owner)
//! DELETE /api/supplier-products/{id}    - Delete listing (auth, owner)
//!
//! # Providers
//! GET    /api/providers/me              - Caller's provider account (auth)
//!
//! # Cart (session)
//! GET    /api/cart                      - Cart with totals
//! PUT    /api/cart                      - Replace contents
//! DELETE /api/cart                      - Clear
//! POST   /api/cart/items                - Add item
//! PATCH  /api/cart/items/{id}           - Set quantity (0 removes)
//! DELETE /api/cart/items/{id}           - Remove item
//! GET    /api/cart/summary              - Checkout totals
//!
//! # Checkout
//! POST   /api/checkout/quote            - Totals for posted lines
//! ```

pub mod cart;
pub mod checkout;
pub mod health;
pub mod listings;
pub mod products;
pub mod providers;
pub mod suppliers;
pub mod verify;

use axum::{
    Router,
    extract::Request,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use crate::middleware::{create_session_layer, request_id_middleware, verify_rate_limiter};
use crate::state::AppState;

/// Create the verification routes router.
pub fn verify_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/verify",
            get(verify::verify_query).post(verify::verify_body),
        )
        .layer(verify_rate_limiter())
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the supplier directory routes router.
pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(suppliers::index))
        .route("/me", get(suppliers::me))
        .route("/{id}", get(suppliers::show))
        .route("/{id}/products", get(suppliers::products))
}

/// Create the listing management routes router.
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(listings::create))
        .route("/{id}", patch(listings::update).delete(listings::delete))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(cart::show).put(cart::set_items).delete(cart::clear),
        )
        .route("/items", post(cart::add_item))
        .route(
            "/items/{id}",
            patch(cart::update_quantity).delete(cart::remove_item),
        )
        .route("/summary", get(cart::summary))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(verify_routes())
        .nest("/api/products", product_routes())
        .nest("/api/suppliers", supplier_routes())
        .nest("/api/supplier-products", listing_routes())
        .route("/api/providers/me", get(providers::me))
        .nest("/api/cart", cart_routes())
        .route("/api/checkout/quote", post(checkout::quote))
}

/// Build the complete application with every middleware layer.
///
/// The session store is a parameter so tests can run against an in-memory
/// store while production uses `PostgreSQL`.
pub fn app<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = create_session_layer(session_store, state.config().is_secure());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .layer(session_layer)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;

    use pharmahub_core::FeeSchedule;

    use super::*;
    use crate::config::ApiConfig;
    use crate::services::auth::tests::{SECRET, token_for};

    fn test_app() -> Router {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/pharmahub_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            jwt_secret: SecretString::from(SECRET),
            fees: FeeSchedule::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_traces_sample_rate: 0.0,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/pharmahub_test")
            .unwrap();
        app(AppState::new(config, pool), MemoryStore::default())
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_verify_blank_code_is_bad_request() {
        let response = test_app()
            .oneshot(empty_request("GET", "/api/verify?code=%20%20"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "NAFDAC code is required");
    }

    #[tokio::test]
    async fn test_verify_missing_code_is_bad_request() {
        let response = test_app()
            .oneshot(json_request("POST", "/api/verify", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "NAFDAC code is required");
    }

    #[tokio::test]
    async fn test_empty_cart_still_charges_delivery() {
        let response = test_app()
            .oneshot(empty_request("GET", "/api/cart"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["items"], serde_json::json!([]));
        assert_eq!(body["item_count"], 0);
        assert_eq!(body["summary"]["subtotal"], "0");
        assert_eq!(body["summary"]["delivery_fee"], "2000");
        assert_eq!(body["summary"]["escrow_fee"], "0");
        assert_eq!(body["summary"]["total"], "2000");
        assert_eq!(body["summary"]["currency"], "NGN");
    }

    #[tokio::test]
    async fn test_replace_with_nothing_empties_cart() {
        let response = test_app()
            .oneshot(json_request("PUT", "/api/cart", r#"{"items": []}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["item_count"], 0);
    }

    #[tokio::test]
    async fn test_update_missing_line_is_not_found() {
        let response = test_app()
            .oneshot(json_request("PATCH", "/api/cart/items/5", r#"{"quantity": 2}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Item not in cart");
    }

    #[tokio::test]
    async fn test_negative_quantity_is_json_bad_request() {
        let response = test_app()
            .oneshot(json_request("PATCH", "/api/cart/items/5", r#"{"quantity": -1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_verify_wrong_code_type_is_json_bad_request() {
        let response = test_app()
            .oneshot(json_request("POST", "/api/verify", r#"{"code": 123}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_malformed_and_untyped_bodies_rejected() {
        let response = test_app()
            .oneshot(json_request("POST", "/api/checkout/quote", "{\"items\": ["))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Malformed JSON in request body"
        );

        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/cart/items")
                    .body(Body::from(r#"{"supplier_product_id": 3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Expected a JSON request body"
        );
    }

    #[tokio::test]
    async fn test_remove_missing_line_is_ok() {
        let response = test_app()
            .oneshot(empty_request("DELETE", "/api/cart/items/5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["item_count"], 0);
    }

    #[tokio::test]
    async fn test_clear_empty_cart_is_ok() {
        let response = test_app()
            .oneshot(empty_request("DELETE", "/api/cart"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["items"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_add_zero_quantity_rejected() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/cart/items",
                r#"{"supplier_product_id": 3, "quantity": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_quote_is_delivery_only() {
        let response = test_app()
            .oneshot(json_request("POST", "/api/checkout/quote", r#"{"items": []}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["total"], "2000");
    }

    #[tokio::test]
    async fn test_supplier_me_requires_token() {
        let response = test_app()
            .oneshot(empty_request("GET", "/api/suppliers/me"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Authentication required");
    }

    #[tokio::test]
    async fn test_forged_token_rejected() {
        let request = Request::builder()
            .uri("/api/providers/me")
            .header(header::AUTHORIZATION, "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid access token");
    }

    #[tokio::test]
    async fn test_create_listing_validates_before_lookup() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/supplier-products")
            .header(header::CONTENT_TYPE, "application/json")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", token_for("sales@emzor.com")),
            )
            .body(Body::from(r#"{"price": "1500"}"#))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "branded_product_id is required"
        );
    }
}
