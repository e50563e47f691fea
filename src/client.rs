use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::account::{Account, AccountId};

pub type ClientId = Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("name is required")]
    NameRequired,
    #[error("email is required")]
    EmailRequired,
    #[error("account does not belong to this client")]
    ForeignAccount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    id: ClientId,
    name: String,
    email: String,
    accounts: Vec<AccountId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ClientError> {
        let now = Utc::now();
        let client = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            accounts: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        client.validate()?;
        Ok(client)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        Self::check(&self.name, &self.email)
    }

    fn check(name: &str, email: &str) -> Result<(), ClientError> {
        if name.is_empty() {
            return Err(ClientError::NameRequired);
        }
        if email.is_empty() {
            return Err(ClientError::EmailRequired);
        }
        Ok(())
    }

    /// Replaces name and email. Invalid input leaves the client untouched.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<(), ClientError> {
        let (name, email) = (name.into(), email.into());
        Self::check(&name, &email)?;
        self.name = name;
        self.email = email;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn add_account(&mut self, account: &Account) -> Result<(), ClientError> {
        if account.client_id() != self.id {
            return Err(ClientError::ForeignAccount);
        }
        self.accounts.push(account.id());
        Ok(())
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
