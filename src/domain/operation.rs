//! Operation kinds and amount canonicalization
//!
//! Every transaction belongs to one of four operation kinds. The kind alone
//! determines the canonical sign of the stored amount: purchases and
//! withdrawals are debits (negative), credit vouchers are credits (positive).
//! Raw input amounts are treated as magnitudes and re-signed here.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DomainError;

/// Closed set of transaction operation kinds.
///
/// The discriminants match the `operation_types` seed rows and the wire
/// contract (`operation_type_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum OperationKind {
    Purchase = 1,
    InstallmentPurchase = 2,
    Withdrawal = 3,
    Credit = 4,
}

impl OperationKind {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    /// Credit vouchers add funds and trigger settlement.
    pub fn is_credit(self) -> bool {
        matches!(self, OperationKind::Credit)
    }

    /// Debit kinds create outstanding balances to be settled later.
    pub fn is_debit(self) -> bool {
        !self.is_credit()
    }

    /// Map a raw amount to its canonically signed value for this kind.
    ///
    /// The input sign is advisory only; debits always come out negative and
    /// credits positive, so re-applying to an already-canonical value is a
    /// no-op.
    pub fn normalize(self, raw: Decimal) -> Decimal {
        if self.is_credit() {
            raw.abs()
        } else {
            -raw.abs()
        }
    }
}

impl TryFrom<i16> for OperationKind {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OperationKind::Purchase),
            2 => Ok(OperationKind::InstallmentPurchase),
            3 => Ok(OperationKind::Withdrawal),
            4 => Ok(OperationKind::Credit),
            other => Err(DomainError::InvalidOperationKind(other)),
        }
    }
}

/// Round a monetary value to exactly two decimal places, half away from zero.
///
/// Applied to every amount before persistence. Idempotent: a value already at
/// two decimals passes through unchanged.
pub fn round_to_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}
