//! Ledger row types
//!
//! Records as they live in the store. `amount` is fixed at creation;
//! `balance` is the outstanding portion and is only ever moved toward zero
//! by settlement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// An account. Created once, immutable thereafter.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub document_number: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// A ledger transaction.
///
/// Debits carry `amount < 0` with `balance` climbing from `amount` to 0 as
/// discharges land; credits carry `amount > 0` with `balance` falling from
/// `amount` to the unallocated remainder.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub operation_type_id: i16,
    pub amount: Decimal,
    pub balance: Decimal,
    pub event_date: DateTime<Utc>,
}

/// Projection of an outstanding debit row as read (and locked) by settlement.
#[derive(Debug, Clone, FromRow)]
pub struct OutstandingDebit {
    pub id: i64,
    pub amount: Decimal,
    pub balance: Decimal,
    pub event_date: DateTime<Utc>,
}
