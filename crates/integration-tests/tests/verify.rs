//! Integration tests for the NAFDAC verification endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p pharmahub-api)

use reqwest::StatusCode;
use serde_json::{Value, json};

use pharmahub_core::VerificationOutcome;
use pharmahub_integration_tests::{api_base_url, database, required_fixture, session_client};
use uuid::Uuid;

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_unknown_code_is_unverified_not_error() {
    let client = session_client();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/api/verify"))
        .query(&[("code", "  ZZ-NOT-REGISTERED-0000  ")])
        .send()
        .await
        .expect("Failed to call verify");

    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: VerificationOutcome = resp.json().await.expect("Invalid verify response");
    assert_eq!(
        outcome,
        VerificationOutcome::Unverified {
            code: "ZZ-NOT-REGISTERED-0000".to_string()
        }
    );
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_blank_code_rejected() {
    let client = session_client();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/verify"))
        .json(&json!({ "code": "   " }))
        .send()
        .await
        .expect("Failed to call verify");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["error"], "NAFDAC code is required");
}

#[tokio::test]
#[ignore = "Requires running API server and PHARMAHUB_TEST_NAFDAC_CODE"]
async fn test_lookup_ignores_case_and_whitespace() {
    let code = required_fixture("PHARMAHUB_TEST_NAFDAC_CODE");
    let client = session_client();
    let base_url = api_base_url();

    let mut outcomes = Vec::new();
    for variant in [code.to_uppercase(), format!("  {}  ", code.to_lowercase())] {
        let resp = client
            .get(format!("{base_url}/api/verify"))
            .query(&[("code", variant.as_str())])
            .send()
            .await
            .expect("Failed to call verify");
        assert_eq!(resp.status(), StatusCode::OK);
        let outcome: VerificationOutcome = resp.json().await.expect("Invalid verify response");
        assert!(outcome.is_verified());
        outcomes.push(outcome);
    }

    assert_eq!(outcomes.first(), outcomes.last());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_non_ascii_code_found_as_stored() {
    let pool = database().await;
    let suffix = Uuid::new_v4().simple().to_string();
    let stored = format!("ß-{suffix}");

    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO branded_products (nafdac_code, brand_name) VALUES ($1, 'Test Brand') RETURNING id",
    )
    .bind(&stored)
    .fetch_one(&pool)
    .await
    .expect("Failed to seed branded product");

    let resp = session_client()
        .get(format!("{}/api/verify", api_base_url()))
        .query(&[("code", format!("ß-{}", suffix.to_uppercase()))])
        .send()
        .await
        .expect("Failed to call verify");
    let outcome: Result<VerificationOutcome, _> = resp.json().await;

    let _ = sqlx::query("DELETE FROM branded_products WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await;

    assert!(outcome.expect("Invalid verify response").is_verified());
}
