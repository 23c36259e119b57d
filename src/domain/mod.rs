//! Domain module
//!
//! Core ledger types and the settlement logic.

pub mod error;
pub mod model;
pub mod operation;
pub mod settlement;

pub use error::DomainError;
pub use model::{Account, OutstandingDebit, Transaction};
pub use operation::{round_to_cents, OperationKind};
pub use settlement::{plan_discharge, DebitDischarge, DischargePlan};
