//! Domain Error Types
//!
//! Validation errors raised before anything touches the store. They are
//! always safe to retry with corrected input.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Amount of zero carries no meaning for any operation kind
    #[error("invalid amount: amount must not be zero")]
    ZeroAmount,

    /// Raw input amounts are magnitudes; the sign is derived from the
    /// operation kind, so negative input is rejected outright
    #[error("invalid amount: amount must not be negative")]
    NegativeAmount,

    /// Operation type id outside the closed set {1, 2, 3, 4}
    #[error("invalid operation_type_id: {0} is not a known operation type")]
    InvalidOperationKind(i16),

    /// Account document number is empty or whitespace
    #[error("document_number cannot be empty")]
    InvalidDocumentNumber,
}
