use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{account::AccountId, gateway::AccountGateway, lock::AccountLocks};

use super::UseCaseError;

#[derive(Debug, Clone)]
pub struct DepositInput {
    pub account_id: AccountId,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct DepositOutput {
    pub balance: Decimal,
}

/// Credits a stored account and persists it.
///
/// The account's slot is held from the credit until the save returns, so a
/// transfer sharing the same [`AccountLocks`] cannot commit in between and
/// be overwritten by the saved snapshot. Non-positive amounts are ignored
/// like [`Account::credit`](crate::account::Account::credit) does.
pub struct DepositUseCase {
    account_gateway: Arc<dyn AccountGateway>,
    locks: Arc<AccountLocks>,
}

impl DepositUseCase {
    pub fn new(account_gateway: Arc<dyn AccountGateway>, locks: Arc<AccountLocks>) -> Self {
        Self {
            account_gateway,
            locks,
        }
    }

    pub fn execute(&self, input: DepositInput) -> Result<DepositOutput, UseCaseError> {
        let handle = self.account_gateway.find_by_id(input.account_id)?;
        tracing::debug!(account_id = %input.account_id, "Account found");

        let slots = self.locks.acquire(&[input.account_id]);
        let _held: Vec<_> = slots.iter().map(|slot| slot.lock()).collect();

        let snapshot = {
            let mut account = handle.lock();
            account.credit(input.amount);
            account.clone()
        };
        self.account_gateway.save(&snapshot)?;
        tracing::info!(
            account_id = %input.account_id,
            amount = %input.amount,
            balance = %snapshot.balance(),
            "Deposit applied"
        );
        Ok(DepositOutput {
            balance: snapshot.balance(),
        })
    }
}
