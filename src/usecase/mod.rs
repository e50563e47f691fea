use thiserror::Error;

use crate::{client::ClientError, gateway::GatewayError, transaction::TransactionError};

pub mod create_account;
pub mod create_client;
pub mod create_transaction;
pub mod deposit;

#[cfg(test)]
mod test_doubles;

/// Failure of a use case. Displays the underlying error unchanged.
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
