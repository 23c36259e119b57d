//! Service module
//!
//! Orchestration between validation, the ledger store and settlement.

pub mod accounts;
pub mod transactions;

pub use accounts::AccountsService;
pub use transactions::TransactionsService;
