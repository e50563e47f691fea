use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    client::{Client, ClientId},
    gateway::ClientGateway,
};

use super::UseCaseError;

#[derive(Debug, Clone)]
pub struct CreateClientInput {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct CreateClientOutput {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct CreateClientUseCase {
    client_gateway: Arc<dyn ClientGateway>,
}

impl CreateClientUseCase {
    pub fn new(client_gateway: Arc<dyn ClientGateway>) -> Self {
        Self { client_gateway }
    }

    pub fn execute(&self, input: CreateClientInput) -> Result<CreateClientOutput, UseCaseError> {
        let client = Client::new(input.name, input.email)?;
        self.client_gateway.save(&client)?;
        tracing::info!(client_id = %client.id(), "Client created");
        Ok(CreateClientOutput {
            id: client.id(),
            name: client.name().to_owned(),
            email: client.email().to_owned(),
            created_at: client.created_at(),
            updated_at: client.updated_at(),
        })
    }
}
