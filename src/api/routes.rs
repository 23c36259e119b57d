//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::{Account, Transaction};
use crate::error::AppError;
use crate::service::{AccountsService, TransactionsService};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub document_number: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub document_number: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            document_number: account.document_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: i64,
    pub operation_type_id: i16,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub account_id: i64,
    pub operation_type_id: i16,
    pub amount: Decimal,
    pub balance: Decimal,
    pub event_date: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            account_id: txn.account_id,
            operation_type_id: txn.operation_type_id,
            amount: txn.amount,
            balance: txn.balance,
            event_date: txn.event_date,
        }
    }
}

// =========================================================================
// Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/v1/accounts", post(create_account))
        .route("/v1/accounts/:id", get(get_account))
        .route("/v1/transactions", post(create_transaction))
}

// =========================================================================
// POST /v1/accounts
// =========================================================================

/// Create a new account
async fn create_account(
    State(pool): State<PgPool>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let service = AccountsService::new(pool);
    let account = service.create_account(&request.document_number).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

// =========================================================================
// GET /v1/accounts/:id
// =========================================================================

/// Get an account by id
async fn get_account(
    State(pool): State<PgPool>,
    Path(account_id): Path<i64>,
) -> Result<Json<AccountResponse>, AppError> {
    let service = AccountsService::new(pool);
    let account = service.get_account(account_id).await?;
    Ok(Json(account.into()))
}

// =========================================================================
// POST /v1/transactions
// =========================================================================

/// Create a transaction; credit vouchers settle before the response is sent
async fn create_transaction(
    State(pool): State<PgPool>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let service = TransactionsService::new(pool);
    let transaction = service
        .create_transaction(request.account_id, request.operation_type_id, request.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction.into())))
}
