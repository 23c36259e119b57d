//! Transactions service
//!
//! Validates a transaction request, persists the row and, for credit
//! vouchers, discharges the credit against the account's outstanding debits.
//! Insert and settlement share one database transaction, so a request either
//! lands fully settled or not at all.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

use crate::domain::{plan_discharge, round_to_cents, DomainError, OperationKind, Transaction};
use crate::error::{AppError, AppResult};
use crate::repository::{accounts, transactions, RepositoryError};

pub struct TransactionsService {
    pool: PgPool,
}

impl TransactionsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a transaction and settle it when it is a credit voucher.
    pub async fn create_transaction(
        &self,
        account_id: i64,
        operation_type_id: i16,
        amount: Decimal,
    ) -> AppResult<Transaction> {
        // The account must exist before anything is written. A vanishing
        // account between this check and the insert still surfaces as a
        // typed foreign-key violation from the store.
        match accounts::get_account_by_id(&self.pool, account_id).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => {
                return Err(AppError::AccountNotFound(account_id));
            }
            Err(err) => return Err(err.into()),
        }

        if amount.is_zero() {
            return Err(DomainError::ZeroAmount.into());
        }
        if amount < Decimal::ZERO {
            return Err(DomainError::NegativeAmount.into());
        }

        let kind = OperationKind::try_from(operation_type_id)?;
        let amount = round_to_cents(kind.normalize(amount));

        let mut tx = self.pool.begin().await?;

        // Balance starts equal to the normalized amount.
        let mut transaction =
            transactions::insert_transaction(&mut tx, account_id, kind, amount, amount).await?;

        if kind.is_credit() {
            settle_credit(&mut tx, &mut transaction)
                .await
                .map_err(|source| AppError::SettlementFailed {
                    transaction_id: transaction.id,
                    source,
                })?;
        }

        tx.commit().await?;

        tracing::info!(
            transaction_id = transaction.id,
            account_id,
            operation_type_id,
            %amount,
            balance = %transaction.balance,
            "transaction created"
        );
        Ok(transaction)
    }
}

/// Discharge a freshly inserted credit against the account's outstanding
/// debits, oldest first.
///
/// The fetch locks the outstanding rows, so two credits racing on the same
/// account serialize here and can never double-discharge a debit. The first
/// failed step aborts the sequence; the caller rolls the transaction back.
async fn settle_credit(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    credit: &mut Transaction,
) -> Result<(), RepositoryError> {
    let outstanding = transactions::fetch_outstanding_debits(tx, credit.account_id).await?;
    let plan = plan_discharge(credit.amount, &outstanding);

    tracing::debug!(
        credit_id = credit.id,
        outstanding = outstanding.len(),
        discharged_rows = plan.discharges.len(),
        total_applied = %plan.total_applied,
        "settling credit"
    );

    for discharge in &plan.discharges {
        transactions::update_balance(tx, discharge.transaction_id, discharge.new_balance).await?;
    }

    // The credit keeps whatever the outstanding debt could not absorb.
    transactions::update_balance(tx, credit.id, plan.remainder).await?;
    credit.balance = plan.remainder;

    Ok(())
}
