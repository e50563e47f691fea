use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::client::{Client, ClientId};

pub type AccountId = Uuid;

/// Account handle shared between the account store and the transactions
/// that move funds through it.
pub type SharedAccount = Arc<Mutex<Account>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    client_id: ClientId,
    balance: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(owner: &Client) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id: owner.id(),
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Opens an empty account for `owner`, or nothing at all when there is no owner.
    pub fn open(owner: Option<&Client>) -> Option<Self> {
        owner.map(Self::new)
    }

    pub fn into_shared(self) -> SharedAccount {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds `amount` to the balance. Non-positive amounts are ignored.
    pub fn credit(&mut self, amount: Decimal) {
        if amount <= Decimal::ZERO {
            return;
        }
        self.balance += amount;
        self.updated_at = Utc::now();
    }

    /// Takes `amount` from the balance. Non-positive amounts and amounts
    /// above the current balance are ignored; reporting insufficient funds
    /// is the caller's job.
    pub fn debit(&mut self, amount: Decimal) {
        if amount <= Decimal::ZERO || amount > self.balance {
            return;
        }
        self.balance -= amount;
        self.updated_at = Utc::now();
    }
}
