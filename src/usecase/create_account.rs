use std::sync::Arc;

use crate::{
    account::{Account, AccountId},
    client::ClientId,
    gateway::{AccountGateway, ClientGateway},
};

use super::UseCaseError;

#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    pub client_id: ClientId,
}

#[derive(Debug, Clone)]
pub struct CreateAccountOutput {
    pub id: AccountId,
}

pub struct CreateAccountUseCase {
    account_gateway: Arc<dyn AccountGateway>,
    client_gateway: Arc<dyn ClientGateway>,
}

impl CreateAccountUseCase {
    pub fn new(
        account_gateway: Arc<dyn AccountGateway>,
        client_gateway: Arc<dyn ClientGateway>,
    ) -> Self {
        Self {
            account_gateway,
            client_gateway,
        }
    }

    pub fn execute(&self, input: CreateAccountInput) -> Result<CreateAccountOutput, UseCaseError> {
        let client = self.client_gateway.get(input.client_id)?;
        let account = Account::new(&client);
        self.account_gateway.save(&account)?;
        tracing::info!(account_id = %account.id(), client_id = %client.id(), "Account created");
        Ok(CreateAccountOutput { id: account.id() })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::{
        client::Client,
        usecase::test_doubles::{AccountGatewayMock, ClientGatewayMock},
    };

    use super::*;

    #[test]
    fn create_account() {
        let client = Client::new("John Doe", "john@example.com").unwrap();
        let clients = Arc::new(ClientGatewayMock::with_client(client.clone()));
        let accounts = Arc::new(AccountGatewayMock::default());
        let uc = CreateAccountUseCase::new(accounts.clone(), clients.clone());

        let output = uc
            .execute(CreateAccountInput {
                client_id: client.id(),
            })
            .unwrap();
        assert_eq!(clients.get_calls(), 1);
        assert_eq!(accounts.save_calls(), 1);

        let saved = accounts.find_by_id(output.id).unwrap();
        let saved = saved.lock();
        assert_eq!(saved.client_id(), client.id());
        assert_eq!(saved.balance(), Decimal::ZERO);
    }

    #[test]
    fn client_not_found() {
        let clients = Arc::new(ClientGatewayMock::default());
        let accounts = Arc::new(AccountGatewayMock::default());
        let uc = CreateAccountUseCase::new(accounts.clone(), clients.clone());

        let err = uc
            .execute(CreateAccountInput {
                client_id: Uuid::new_v4(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "client not found");
        assert_eq!(clients.get_calls(), 1);
        assert_eq!(accounts.save_calls(), 0);
    }

    #[test]
    fn account_gateway_error() {
        let client = Client::new("John Doe", "john@example.com").unwrap();
        let clients = Arc::new(ClientGatewayMock::with_client(client.clone()));
        let accounts = Arc::new(AccountGatewayMock::failing_save("database error"));
        let uc = CreateAccountUseCase::new(accounts.clone(), clients.clone());

        let err = uc
            .execute(CreateAccountInput {
                client_id: client.id(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "database error");
        assert_eq!(clients.get_calls(), 1);
        assert_eq!(accounts.save_calls(), 1);
    }
}
