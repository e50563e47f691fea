use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    account::AccountId,
    event::{DomainEvent, EventSink, TransactionCreated},
    gateway::{AccountGateway, TransactionGateway},
    lock::AccountLocks,
    transaction::{Transaction, TransactionId},
};

use super::UseCaseError;

#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub account_id_from: AccountId,
    pub account_id_to: AccountId,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct CreateTransactionOutput {
    pub id: TransactionId,
}

/// Moves funds between two stored accounts.
///
/// Balances are committed in memory before the transaction is persisted. A
/// persistence error is returned as is, but the funds have already moved:
/// callers should re-read the accounts instead of resubmitting.
pub struct CreateTransactionUseCase {
    transaction_gateway: Arc<dyn TransactionGateway>,
    account_gateway: Arc<dyn AccountGateway>,
    event_sink: Arc<dyn EventSink>,
    locks: Arc<AccountLocks>,
}

impl CreateTransactionUseCase {
    pub fn new(
        transaction_gateway: Arc<dyn TransactionGateway>,
        account_gateway: Arc<dyn AccountGateway>,
        event_sink: Arc<dyn EventSink>,
    ) -> Self {
        Self::with_locks(
            transaction_gateway,
            account_gateway,
            event_sink,
            Arc::default(),
        )
    }

    /// Shares `locks` with other use cases moving funds between the same accounts.
    pub fn with_locks(
        transaction_gateway: Arc<dyn TransactionGateway>,
        account_gateway: Arc<dyn AccountGateway>,
        event_sink: Arc<dyn EventSink>,
        locks: Arc<AccountLocks>,
    ) -> Self {
        Self {
            transaction_gateway,
            account_gateway,
            event_sink,
            locks,
        }
    }

    pub fn execute(
        &self,
        input: CreateTransactionInput,
    ) -> Result<CreateTransactionOutput, UseCaseError> {
        let account_from = self.account_gateway.find_by_id(input.account_id_from)?;
        tracing::debug!(account_id = %input.account_id_from, "Account from found");
        let account_to = self.account_gateway.find_by_id(input.account_id_to)?;
        tracing::debug!(account_id = %input.account_id_to, "Account to found");

        // slots are released before dispatch so handlers may move funds again
        let transaction = {
            let slots = self
                .locks
                .acquire(&[input.account_id_from, input.account_id_to]);
            let _held: Vec<_> = slots.iter().map(|slot| slot.lock()).collect();
            tracing::debug!(
                from = %input.account_id_from,
                to = %input.account_id_to,
                "Account locks held"
            );

            let transaction =
                Transaction::new(Some(account_from), Some(account_to), input.amount)?;
            if let Err(err) = self.transaction_gateway.save(&transaction) {
                tracing::warn!(
                    transaction_id = %transaction.id,
                    error = %err,
                    "Transaction committed in memory but not persisted"
                );
                return Err(err.into());
            }
            transaction
        };
        tracing::info!(
            transaction_id = %transaction.id,
            from = %input.account_id_from,
            to = %input.account_id_to,
            amount = %transaction.amount,
            "Transaction created"
        );

        let event = DomainEvent::TransactionCreated(TransactionCreated {
            transaction_id: transaction.id,
            account_from_id: input.account_id_from,
            account_to_id: input.account_id_to,
            amount: transaction.amount,
            occurred_at: transaction.created_at,
        });
        if let Err(err) = self.event_sink.dispatch(&event) {
            tracing::warn!(
                transaction_id = %transaction.id,
                error = %err,
                "Failed to dispatch {}",
                event.name()
            );
        }

        Ok(CreateTransactionOutput { id: transaction.id })
    }
}
