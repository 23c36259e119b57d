//! Accounts service

use sqlx::PgPool;

use crate::domain::{Account, DomainError};
use crate::error::{AppError, AppResult};
use crate::repository::{accounts, RepositoryError};

pub struct AccountsService {
    pool: PgPool,
}

impl AccountsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account with a non-empty document number.
    pub async fn create_account(&self, document_number: &str) -> AppResult<Account> {
        if document_number.trim().is_empty() {
            return Err(DomainError::InvalidDocumentNumber.into());
        }

        let account = accounts::insert_account(&self.pool, document_number).await?;
        tracing::info!(account_id = account.id, "account created");
        Ok(account)
    }

    /// Retrieve an account by id.
    pub async fn get_account(&self, account_id: i64) -> AppResult<Account> {
        match accounts::get_account_by_id(&self.pool, account_id).await {
            Ok(account) => Ok(account),
            Err(RepositoryError::NotFound) => Err(AppError::AccountNotFound(account_id)),
            Err(err) => Err(err.into()),
        }
    }
}
