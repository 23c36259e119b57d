//! Accounts repository

use sqlx::PgPool;

use crate::domain::Account;

use super::error::{classify, RepositoryError};

/// Insert a new account. Duplicate document numbers surface as
/// `RepositoryError::UniqueViolation`.
pub async fn insert_account(
    pool: &PgPool,
    document_number: &str,
) -> Result<Account, RepositoryError> {
    sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (document_number)
        VALUES ($1)
        RETURNING id, document_number, created_at
        "#,
    )
    .bind(document_number)
    .fetch_one(pool)
    .await
    .map_err(classify)
}

/// Fetch an account by id; `RepositoryError::NotFound` when absent.
pub async fn get_account_by_id(
    pool: &PgPool,
    account_id: i64,
) -> Result<Account, RepositoryError> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, document_number, created_at
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)
}
