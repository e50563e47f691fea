use thiserror::Error;

use crate::{
    account::{Account, AccountId, SharedAccount},
    client::{Client, ClientId},
    transaction::Transaction,
};

pub mod in_memory;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Backend failure, displayed exactly as the backend reported it.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub trait ClientGateway: Send + Sync {
    fn get(&self, id: ClientId) -> Result<Client, GatewayError>;

    fn save(&self, client: &Client) -> Result<(), GatewayError>;
}

pub trait AccountGateway: Send + Sync {
    /// Returns the live handle of the account, shared with every other
    /// holder of the same id.
    fn find_by_id(&self, id: AccountId) -> Result<SharedAccount, GatewayError>;

    /// Persists a snapshot of `account`. Must not be called while holding
    /// the lock of the same account's handle.
    fn save(&self, account: &Account) -> Result<(), GatewayError>;
}

pub trait TransactionGateway: Send + Sync {
    fn save(&self, transaction: &Transaction) -> Result<(), GatewayError>;
}
