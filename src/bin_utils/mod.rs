//! Batch driver that replays a CSV list of operations against in-memory
//! gateways and prints the resulting balances.

use std::{
    collections::{BTreeMap, HashMap},
    io::{Read, Write},
    sync::Arc,
};

use anyhow::{Context, Result};
use csv_parser::{CsvOperationParser, Operation, OperationKind};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    account::AccountId,
    client::ClientId,
    event::{DomainEvent, EventDispatcher, EventError, EventHandler},
    lock::AccountLocks,
    gateway::{
        AccountGateway, GatewayError,
        in_memory::{InMemoryAccountGateway, InMemoryClientGateway, InMemoryTransactionGateway},
    },
    usecase::{
        UseCaseError,
        create_account::{CreateAccountInput, CreateAccountUseCase},
        create_client::{CreateClientInput, CreateClientUseCase},
        create_transaction::{CreateTransactionInput, CreateTransactionUseCase},
        deposit::{DepositInput, DepositUseCase},
    },
};

pub mod csv_parser;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error("`{field}` is required for {kind:?}")]
    MissingField {
        field: &'static str,
        kind: OperationKind,
    },
    #[error("Label `{0}` is already taken")]
    DuplicateLabel(String),
    #[error("Unknown client `{0}`")]
    UnknownClient(String),
    #[error("Unknown account `{0}`")]
    UnknownAccount(String),
    #[error(transparent)]
    UseCase(#[from] UseCaseError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut ledger = Ledger::new()?;

        for (line, row) in parser {
            if let Err(err) = row
                .map_err(OperationError::from)
                .and_then(|op| ledger.apply(op))
            {
                (self.error_printer)(line, err);
            }
        }

        ledger.write_balances(self.output)
    }
}

/// Logs every committed transfer.
struct TransferLog;

impl EventHandler for TransferLog {
    fn name(&self) -> &str {
        "transfer-log"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), EventError> {
        let DomainEvent::TransactionCreated(payload) = event;
        tracing::info!(
            transaction_id = %payload.transaction_id,
            from = %payload.account_from_id,
            to = %payload.account_to_id,
            amount = %payload.amount,
            "Transfer committed"
        );
        Ok(())
    }
}

fn required<T>(
    value: Option<T>,
    field: &'static str,
    kind: OperationKind,
) -> Result<T, OperationError> {
    value.ok_or(OperationError::MissingField { field, kind })
}

/// Output row, one per opened account.
#[derive(Debug, Serialize)]
struct AccountBalance<'a> {
    account: &'a str,
    client: &'a str,
    balance: Decimal,
}

struct Ledger {
    clients: HashMap<String, ClientId>,
    // label -> (id, owner label)
    accounts: BTreeMap<String, (AccountId, String)>,
    account_gateway: Arc<InMemoryAccountGateway>,
    create_client: CreateClientUseCase,
    create_account: CreateAccountUseCase,
    create_transaction: CreateTransactionUseCase,
    deposit: DepositUseCase,
}

impl Ledger {
    fn new() -> Result<Self> {
        let client_gateway = Arc::new(InMemoryClientGateway::default());
        let account_gateway = Arc::new(InMemoryAccountGateway::default());
        let locks = Arc::new(AccountLocks::default());
        let dispatcher = Arc::new(EventDispatcher::new());
        dispatcher.register("TransactionCreated", Arc::new(TransferLog))?;

        Ok(Self {
            clients: HashMap::new(),
            accounts: BTreeMap::new(),
            create_client: CreateClientUseCase::new(client_gateway.clone()),
            create_account: CreateAccountUseCase::new(
                account_gateway.clone(),
                client_gateway.clone(),
            ),
            create_transaction: CreateTransactionUseCase::with_locks(
                Arc::new(InMemoryTransactionGateway::default()),
                account_gateway.clone(),
                dispatcher,
                locks.clone(),
            ),
            deposit: DepositUseCase::new(account_gateway.clone(), locks),
            account_gateway,
        })
    }

    fn apply(&mut self, op: Operation) -> Result<(), OperationError> {
        let kind = op.kind;
        match kind {
            OperationKind::Client => {
                let name = required(op.client, "client", kind)?;
                if self.clients.contains_key(&name) {
                    return Err(OperationError::DuplicateLabel(name));
                }
                let output = self.create_client.execute(CreateClientInput {
                    name: name.clone(),
                    email: op.email.unwrap_or_default(),
                })?;
                self.clients.insert(name, output.id);
            }
            OperationKind::Open => {
                let owner = required(op.client, "client", kind)?;
                let label = required(op.account, "account", kind)?;
                if self.accounts.contains_key(&label) {
                    return Err(OperationError::DuplicateLabel(label));
                }
                let client_id = *self
                    .clients
                    .get(&owner)
                    .ok_or_else(|| OperationError::UnknownClient(owner.clone()))?;
                let output = self
                    .create_account
                    .execute(CreateAccountInput { client_id })?;
                self.accounts.insert(label, (output.id, owner));
            }
            OperationKind::Deposit => {
                let account_id = self.account_id(required(op.account, "account", kind)?)?;
                let amount = required(op.amount, "amount", kind)?;
                self.deposit.execute(DepositInput { account_id, amount })?;
            }
            OperationKind::Transfer => {
                let account_id_from = self.account_id(required(op.account, "account", kind)?)?;
                let account_id_to = self.account_id(required(op.to, "to", kind)?)?;
                let amount = required(op.amount, "amount", kind)?;
                self.create_transaction.execute(CreateTransactionInput {
                    account_id_from,
                    account_id_to,
                    amount,
                })?;
            }
        }
        Ok(())
    }

    fn account_id(&self, label: String) -> Result<AccountId, OperationError> {
        match self.accounts.get(&label) {
            Some((id, _)) => Ok(*id),
            None => Err(OperationError::UnknownAccount(label)),
        }
    }

    fn write_balances<W: Write>(&self, output: &mut W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(output);
        for (label, (id, owner)) in &self.accounts {
            let balance = self.account_gateway.find_by_id(*id)?.lock().balance();
            writer
                .serialize(AccountBalance {
                    account: label,
                    client: owner,
                    balance,
                })
                .with_context(|| format!("Failed to write balance of `{label}`"))?;
        }
        writer.flush().context("Failed to flush balances")?;
        Ok(())
    }
}
