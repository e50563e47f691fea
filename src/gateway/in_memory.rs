use std::collections::HashMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::{
    account::{Account, AccountId, SharedAccount},
    client::{Client, ClientId},
    transaction::{Transaction, TransactionId},
};

use super::{AccountGateway, ClientGateway, GatewayError, TransactionGateway};

#[derive(Default)]
pub struct InMemoryClientGateway {
    clients: RwLock<HashMap<ClientId, Client>>,
}

impl ClientGateway for InMemoryClientGateway {
    fn get(&self, id: ClientId) -> Result<Client, GatewayError> {
        self.clients
            .read()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound("client"))
    }

    fn save(&self, client: &Client) -> Result<(), GatewayError> {
        self.clients.write().insert(client.id(), client.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAccountGateway {
    accounts: RwLock<HashMap<AccountId, SharedAccount>>,
}

impl InMemoryAccountGateway {
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl AccountGateway for InMemoryAccountGateway {
    fn find_by_id(&self, id: AccountId) -> Result<SharedAccount, GatewayError> {
        self.accounts
            .read()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound("account"))
    }

    fn save(&self, account: &Account) -> Result<(), GatewayError> {
        let mut accounts = self.accounts.write();
        match accounts.get(&account.id()) {
            // keep the handle so holders observe the saved state
            Some(handle) => *handle.lock() = account.clone(),
            None => {
                accounts.insert(account.id(), account.clone().into_shared());
            }
        }
        Ok(())
    }
}

/// Row kept for every saved transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub account_from: Option<AccountId>,
    pub account_to: Option<AccountId>,
    pub amount: Decimal,
}

#[derive(Default)]
pub struct InMemoryTransactionGateway {
    records: RwLock<Vec<TransactionRecord>>,
}

impl InMemoryTransactionGateway {
    pub fn records(&self) -> Vec<TransactionRecord> {
        self.records.read().clone()
    }
}

impl TransactionGateway for InMemoryTransactionGateway {
    fn save(&self, transaction: &Transaction) -> Result<(), GatewayError> {
        self.records.write().push(TransactionRecord {
            id: transaction.id,
            account_from: transaction.account_from_id(),
            account_to: transaction.account_to_id(),
            amount: transaction.amount,
        });
        Ok(())
    }
}
