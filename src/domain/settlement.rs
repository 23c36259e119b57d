//! Settlement planning
//!
//! Greedy oldest-first allocation of a credit against outstanding debits.
//! The planner is a pure function over the locked outstanding set; the
//! service layer applies the resulting plan inside the same database
//! transaction that produced the snapshot.

use rust_decimal::Decimal;

use super::model::OutstandingDebit;

/// One balance update produced by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebitDischarge {
    pub transaction_id: i64,
    /// Positive magnitude taken from the credit for this row.
    pub applied: Decimal,
    /// Resulting balance, in `[old balance, 0]`.
    pub new_balance: Decimal,
}

/// Full allocation of one credit across the outstanding set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DischargePlan {
    pub discharges: Vec<DebitDischarge>,
    pub total_applied: Decimal,
    /// `credit_amount - total_applied`; stays positive when the credit
    /// exceeded total outstanding debt, zero when fully absorbed.
    pub remainder: Decimal,
}

impl DischargePlan {
    pub fn is_empty(&self) -> bool {
        self.discharges.is_empty()
    }
}

/// Allocate `credit_amount` against `outstanding`, oldest first.
///
/// `outstanding` must already be ordered by `event_date ASC, id ASC` (the
/// store's fetch contract). No debit is ever paid beyond its own outstanding
/// magnitude and the credit is never overspent.
pub fn plan_discharge(credit_amount: Decimal, outstanding: &[OutstandingDebit]) -> DischargePlan {
    let mut available = credit_amount;
    let mut total_applied = Decimal::ZERO;
    let mut discharges = Vec::new();

    for debit in outstanding {
        if available <= Decimal::ZERO {
            break;
        }

        // Positive magnitude still owed on this row.
        let need = -debit.balance;
        if need <= Decimal::ZERO {
            continue;
        }

        let applied = available.min(need);
        discharges.push(DebitDischarge {
            transaction_id: debit.id,
            applied,
            new_balance: debit.balance + applied,
        });

        available -= applied;
        total_applied += applied;
    }

    DischargePlan {
        discharges,
        total_applied,
        remainder: credit_amount - total_applied,
    }
}
