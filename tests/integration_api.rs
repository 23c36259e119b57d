//! API integration tests
//!
//! End-to-end request/response checks against a real database, including the
//! settlement scenarios visible through the transactions endpoint.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    middleware, Router,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::util::ServiceExt;

use ledgerd::api;

mod common;

fn build_app(pool: PgPool) -> Router {
    api::create_router()
        .layer(middleware::from_fn(api::middleware::request_id_middleware))
        .with_state(pool)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_account(app: &Router) -> i64 {
    let document_number = format!("doc-{}", uuid::Uuid::new_v4());
    let (status, body) = post_json(
        app,
        "/v1/accounts",
        json!({ "document_number": document_number }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "account creation failed");
    body["id"].as_i64().unwrap()
}

async fn create_transaction(app: &Router, account_id: i64, kind: i16, amount: Value) -> Value {
    let (status, body) = post_json(
        app,
        "/v1/transactions",
        json!({ "account_id": account_id, "operation_type_id": kind, "amount": amount }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "transaction failed: {body}");
    body
}

async fn balance_of(pool: &PgPool, transaction_id: i64) -> Decimal {
    sqlx::query_scalar("SELECT balance FROM transactions WHERE id = $1")
        .bind(transaction_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_account_create_and_get() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool);

    let document_number = format!("doc-{}", uuid::Uuid::new_v4());
    let (status, body) = post_json(
        &app,
        "/v1/accounts",
        json!({ "document_number": document_number }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["document_number"], document_number);
    let id = body["id"].as_i64().unwrap();

    let request = Request::builder()
        .uri(format!("/v1/accounts/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Duplicate document number conflicts.
    let (status, body) = post_json(
        &app,
        "/v1/accounts",
        json!({ "document_number": document_number }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "conflict");
}

#[tokio::test]
async fn test_account_not_found() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool);

    let request = Request::builder()
        .uri("/v1/accounts/999999999")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_code"], "account_not_found");
}

#[tokio::test]
async fn test_empty_document_number_rejected() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool);

    let (status, body) = post_json(&app, "/v1/accounts", json!({ "document_number": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn test_debit_is_negatively_signed_and_rounded() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool);
    let account_id = create_account(&app).await;

    let body = create_transaction(&app, account_id, 1, json!(123.456)).await;
    assert_eq!(body["amount"], "-123.46");
    assert_eq!(body["balance"], "-123.46");
    assert_eq!(body["account_id"].as_i64().unwrap(), account_id);
}

#[tokio::test]
async fn test_credit_with_no_outstanding_debt() {
    // Scenario: fresh account, credit of 200.00 keeps its full balance.
    let pool = common::setup_test_db().await;
    let app = build_app(pool);
    let account_id = create_account(&app).await;

    let body = create_transaction(&app, account_id, 4, json!(200.00)).await;
    assert_eq!(body["amount"], "200.00");
    assert_eq!(body["balance"], "200.00");
}

#[tokio::test]
async fn test_credit_settles_two_debits_exactly() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool.clone());
    let account_id = create_account(&app).await;

    let d1 = create_transaction(&app, account_id, 1, json!(100.00)).await;
    let d2 = create_transaction(&app, account_id, 3, json!(100.00)).await;

    let credit = create_transaction(&app, account_id, 4, json!(200.00)).await;
    assert_eq!(credit["balance"], "0.00");

    assert_eq!(balance_of(&pool, d1["id"].as_i64().unwrap()).await, dec!(0.00));
    assert_eq!(balance_of(&pool, d2["id"].as_i64().unwrap()).await, dec!(0.00));
}

#[tokio::test]
async fn test_partial_discharge_pays_oldest_first() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool.clone());
    let account_id = create_account(&app).await;

    let d1 = create_transaction(&app, account_id, 1, json!(100.00)).await;
    let d2 = create_transaction(&app, account_id, 2, json!(100.00)).await;

    let credit = create_transaction(&app, account_id, 4, json!(150.00)).await;
    assert_eq!(credit["balance"], "0.00");

    assert_eq!(balance_of(&pool, d1["id"].as_i64().unwrap()).await, dec!(0.00));
    assert_eq!(
        balance_of(&pool, d2["id"].as_i64().unwrap()).await,
        dec!(-50.00)
    );
}

#[tokio::test]
async fn test_small_credit_partially_discharges() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool.clone());
    let account_id = create_account(&app).await;

    let debit = create_transaction(&app, account_id, 1, json!(100.00)).await;
    let credit = create_transaction(&app, account_id, 4, json!(50.00)).await;

    assert_eq!(credit["balance"], "0.00");
    assert_eq!(
        balance_of(&pool, debit["id"].as_i64().unwrap()).await,
        dec!(-50.00)
    );
}

#[tokio::test]
async fn test_zero_amount_rejected_without_persistence() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool.clone());
    let account_id = create_account(&app).await;

    let (status, body) = post_json(
        &app,
        "/v1/transactions",
        json!({ "account_id": account_id, "operation_type_id": 1, "amount": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_amount");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_negative_amount_rejected() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool);
    let account_id = create_account(&app).await;

    let (status, body) = post_json(
        &app,
        "/v1/transactions",
        json!({ "account_id": account_id, "operation_type_id": 4, "amount": -100.00 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_amount");
}

#[tokio::test]
async fn test_unknown_operation_type_rejected_without_persistence() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool.clone());
    let account_id = create_account(&app).await;

    let (status, body) = post_json(
        &app,
        "/v1/transactions",
        json!({ "account_id": account_id, "operation_type_id": 99, "amount": 10.00 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_operation_type");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_transaction_for_missing_account() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool);

    let (status, body) = post_json(
        &app,
        "/v1/transactions",
        json!({ "account_id": 999999999, "operation_type_id": 1, "amount": 10.00 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "account_not_found");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let pool = common::setup_test_db().await;
    let app = build_app(pool);

    let request = Request::builder()
        .uri("/v1/accounts/1")
        .header("x-request-id", "test-req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-req-42"
    );
}
