//! Ledger store
//!
//! sqlx/Postgres persistence for accounts and transactions. Store failures
//! surface as typed `RepositoryError` values instead of free-text inspection
//! of driver messages.

pub mod accounts;
pub mod error;
pub mod transactions;

pub use error::{ForeignReference, RepositoryError};
