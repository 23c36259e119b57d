//! Transactions repository
//!
//! All writes run on the caller's connection so the service layer can span
//! insert, outstanding-debit fetch and balance updates with one database
//! transaction.

use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::domain::{OperationKind, OutstandingDebit, Transaction};

use super::error::{classify, RepositoryError};

/// Insert a transaction row. `balance` starts equal to the normalized
/// `amount`; `event_date` is assigned by the store.
pub async fn insert_transaction(
    conn: &mut PgConnection,
    account_id: i64,
    kind: OperationKind,
    amount: Decimal,
    balance: Decimal,
) -> Result<Transaction, RepositoryError> {
    sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (account_id, operation_type_id, amount, balance)
        VALUES ($1, $2, $3, $4)
        RETURNING id, account_id, operation_type_id, amount, balance, event_date
        "#,
    )
    .bind(account_id)
    .bind(kind.as_i16())
    .bind(amount)
    .bind(balance)
    .fetch_one(&mut *conn)
    .await
    .map_err(classify)
}

/// Fetch and lock the outstanding debits for an account, oldest first.
///
/// `FOR UPDATE` serializes concurrent settlements on the same account: a
/// second discharge blocks here until the first commits, then reads the
/// post-discharge balances. Ties on `event_date` break on `id` so the order
/// is stable.
pub async fn fetch_outstanding_debits(
    conn: &mut PgConnection,
    account_id: i64,
) -> Result<Vec<OutstandingDebit>, RepositoryError> {
    sqlx::query_as::<_, OutstandingDebit>(
        r#"
        SELECT id, amount, balance, event_date
        FROM transactions
        WHERE account_id = $1
          AND balance < 0
          AND operation_type_id IN (1, 2, 3)
        ORDER BY event_date ASC, id ASC
        FOR UPDATE
        "#,
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(RepositoryError::Database)
}

/// Persist a new balance for one transaction row.
///
/// Exactly one row must be affected; anything else means the row vanished or
/// the store diverged from the locked read, and the whole unit of work must
/// roll back.
pub async fn update_balance(
    conn: &mut PgConnection,
    transaction_id: i64,
    new_balance: Decimal,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(
        r#"
        UPDATE transactions
        SET balance = $1, updated_at = now()
        WHERE id = $2
        "#,
    )
    .bind(new_balance)
    .bind(transaction_id)
    .execute(&mut *conn)
    .await?;

    let rows = result.rows_affected();
    if rows != 1 {
        return Err(RepositoryError::InconsistentUpdate {
            transaction_id,
            rows,
        });
    }
    Ok(())
}
