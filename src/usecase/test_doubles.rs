//! Gateway and sink doubles that count their calls.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use anyhow::anyhow;
use parking_lot::Mutex;

use crate::{
    account::{Account, AccountId, SharedAccount},
    client::{Client, ClientId},
    event::{DomainEvent, EventError, EventSink},
    gateway::{AccountGateway, ClientGateway, GatewayError, TransactionGateway},
    transaction::Transaction,
};

#[derive(Default)]
pub struct ClientGatewayMock {
    clients: Mutex<HashMap<ClientId, Client>>,
    save_error: Option<&'static str>,
    get_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl ClientGatewayMock {
    pub fn with_client(client: Client) -> Self {
        let mock = Self::default();
        mock.clients.lock().insert(client.id(), client);
        mock
    }

    pub fn failing_save(message: &'static str) -> Self {
        Self {
            save_error: Some(message),
            ..Default::default()
        }
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

impl ClientGateway for ClientGatewayMock {
    fn get(&self, id: ClientId) -> Result<Client, GatewayError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.clients
            .lock()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound("client"))
    }

    fn save(&self, client: &Client) -> Result<(), GatewayError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.save_error {
            return Err(anyhow!(message).into());
        }
        self.clients.lock().insert(client.id(), client.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct AccountGatewayMock {
    accounts: Mutex<HashMap<AccountId, SharedAccount>>,
    save_error: Option<&'static str>,
    find_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl AccountGatewayMock {
    pub fn with_accounts(accounts: &[SharedAccount]) -> Self {
        let mock = Self::default();
        for acc in accounts {
            let id = acc.lock().id();
            mock.accounts.lock().insert(id, acc.clone());
        }
        mock
    }

    pub fn failing_save(message: &'static str) -> Self {
        Self {
            save_error: Some(message),
            ..Default::default()
        }
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

impl AccountGateway for AccountGatewayMock {
    fn find_by_id(&self, id: AccountId) -> Result<SharedAccount, GatewayError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .lock()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound("account"))
    }

    fn save(&self, account: &Account) -> Result<(), GatewayError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.save_error {
            return Err(anyhow!(message).into());
        }
        self.accounts
            .lock()
            .insert(account.id(), account.clone().into_shared());
        Ok(())
    }
}

#[derive(Default)]
pub struct TransactionGatewayMock {
    saved: Mutex<Vec<Transaction>>,
    save_error: Option<&'static str>,
}

impl TransactionGatewayMock {
    pub fn failing_save(message: &'static str) -> Self {
        Self {
            save_error: Some(message),
            ..Default::default()
        }
    }

    pub fn save_calls(&self) -> usize {
        self.saved.lock().len()
    }

    pub fn saved(&self) -> Vec<Transaction> {
        self.saved.lock().clone()
    }
}

impl TransactionGateway for TransactionGatewayMock {
    fn save(&self, transaction: &Transaction) -> Result<(), GatewayError> {
        self.saved.lock().push(transaction.clone());
        match self.save_error {
            Some(message) => Err(anyhow!(message).into()),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct EventSinkMock {
    events: Mutex<Vec<DomainEvent>>,
    fail: bool,
}

impl EventSinkMock {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for EventSinkMock {
    fn dispatch(&self, event: &DomainEvent) -> Result<(), EventError> {
        self.events.lock().push(event.clone());
        if self.fail {
            return Err(EventError::HandlerFailed {
                handler: "mock".to_owned(),
                reason: "unreachable listener".to_owned(),
            });
        }
        Ok(())
    }
}
