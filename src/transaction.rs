use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::account::{AccountId, SharedAccount};

pub type TransactionId = Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("account from cannot be nil")]
    MissingAccountFrom,
    #[error("account to cannot be nil")]
    MissingAccountTo,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("insufficient funds in account from")]
    InsufficientFunds,
}

/// A transfer of `amount` from one account to another.
///
/// [`Transaction::new`] validates and commits in one step, so every value it
/// returns has already moved the funds. Assembling the struct by hand lets the
/// caller drive [`Transaction::validate`] and [`Transaction::commit`] separately.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_from: Option<SharedAccount>,
    pub account_to: Option<SharedAccount>,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        account_from: Option<SharedAccount>,
        account_to: Option<SharedAccount>,
        amount: Decimal,
    ) -> Result<Self, TransactionError> {
        let transaction = Self {
            id: Uuid::new_v4(),
            account_from,
            account_to,
            amount,
            created_at: Utc::now(),
        };
        transaction.validate()?;
        transaction.commit();
        Ok(transaction)
    }

    /// Checks every precondition of the transfer without touching balances.
    pub fn validate(&self) -> Result<(), TransactionError> {
        let Some(from) = &self.account_from else {
            return Err(TransactionError::MissingAccountFrom);
        };
        if self.account_to.is_none() {
            return Err(TransactionError::MissingAccountTo);
        }
        if self.amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount);
        }
        if from.lock().balance() < self.amount {
            return Err(TransactionError::InsufficientFunds);
        }
        Ok(())
    }

    /// Debits the source and credits the destination. Does not validate.
    ///
    /// Each account is locked only for its own half, so source and
    /// destination may be the same handle. Nothing happens unless both
    /// sides are present.
    pub fn commit(&self) {
        let (Some(from), Some(to)) = (&self.account_from, &self.account_to) else {
            return;
        };
        from.lock().debit(self.amount);
        to.lock().credit(self.amount);
    }

    pub fn account_from_id(&self) -> Option<AccountId> {
        self.account_from.as_ref().map(|acc| acc.lock().id())
    }

    pub fn account_to_id(&self) -> Option<AccountId> {
        self.account_to.as_ref().map(|acc| acc.lock().id())
    }
}
