//! Ledger store errors
//!
//! Constraint violations are classified by SQLSTATE and constraint name into
//! structured variants the service layer can match on.

use std::fmt;

use thiserror::Error;

/// Which reference a foreign-key violation points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignReference {
    Account,
    OperationKind,
}

impl fmt::Display for ForeignReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForeignReference::Account => write!(f, "account_id"),
            ForeignReference::OperationKind => write!(f, "operation_type_id"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Row lookup came back empty
    #[error("row not found")]
    NotFound,

    /// Insert referenced a row that does not exist
    #[error("foreign key violation on {reference}")]
    ForeignKeyViolation { reference: ForeignReference },

    /// Unique constraint rejected the insert
    #[error("unique constraint violation: {constraint}")]
    UniqueViolation { constraint: String },

    /// A balance update did not affect exactly one row. Fatal for the
    /// request: the store state diverged from what was read.
    #[error("balance update for transaction {transaction_id} affected {rows} rows, expected 1")]
    InconsistentUpdate { transaction_id: i64, rows: u64 },

    /// I/O or connectivity failure; retry is the caller's policy
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Fatal errors must abort the discharge loop rather than be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RepositoryError::InconsistentUpdate { .. })
    }
}

/// Classify a sqlx error by SQLSTATE and constraint name.
///
/// 23503 is foreign_key_violation, 23505 unique_violation; anything else
/// passes through as a generic database error.
pub(crate) fn classify(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        let constraint = db.constraint().map(str::to_owned);
        match db.code().as_deref() {
            Some("23503") => {
                let reference = match constraint.as_deref() {
                    Some(name) if name.contains("operation_type") => {
                        ForeignReference::OperationKind
                    }
                    _ => ForeignReference::Account,
                };
                return RepositoryError::ForeignKeyViolation { reference };
            }
            Some("23505") => {
                return RepositoryError::UniqueViolation {
                    constraint: constraint.unwrap_or_else(|| "unknown".to_owned()),
                };
            }
            _ => {}
        }
    }
    RepositoryError::Database(err)
}
