use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{account::AccountId, transaction::TransactionId};

#[derive(Debug, Error)]
pub enum EventError {
    #[error("handler already registered")]
    HandlerAlreadyRegistered,
    #[error("handler `{handler}` failed: {reason}")]
    HandlerFailed { handler: String, reason: String },
}

/// Payload handed to listeners; flat so it serializes to any row format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionCreated {
    pub transaction_id: TransactionId,
    pub account_from_id: AccountId,
    pub account_to_id: AccountId,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    TransactionCreated(TransactionCreated),
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::TransactionCreated(_) => "TransactionCreated",
        }
    }
}

/// Destination of domain events. Delivery is best effort.
pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: &DomainEvent) -> Result<(), EventError>;
}

pub trait EventHandler: Send + Sync {
    fn name(&self) -> &str;

    fn handle(&self, event: &DomainEvent) -> Result<(), EventError>;
}

/// In-process fan-out of events to the handlers registered under their name.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        event_name: &str,
        handler: Arc<dyn EventHandler>,
    ) -> Result<(), EventError> {
        let mut handlers = self.handlers.write();
        let registered = handlers.entry(event_name.to_owned()).or_default();
        if registered.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return Err(EventError::HandlerAlreadyRegistered);
        }
        registered.push(handler);
        Ok(())
    }

    pub fn has(&self, event_name: &str, handler: &Arc<dyn EventHandler>) -> bool {
        self.handlers
            .read()
            .get(event_name)
            .is_some_and(|registered| registered.iter().any(|h| Arc::ptr_eq(h, handler)))
    }

    pub fn remove(&self, event_name: &str, handler: &Arc<dyn EventHandler>) {
        if let Some(registered) = self.handlers.write().get_mut(event_name) {
            registered.retain(|h| !Arc::ptr_eq(h, handler));
        }
    }

    pub fn clear(&self) {
        self.handlers.write().clear();
    }
}

impl EventSink for EventDispatcher {
    fn dispatch(&self, event: &DomainEvent) -> Result<(), EventError> {
        // handlers may register more handlers, don't hold the lock while calling them
        let handlers = self
            .handlers
            .read()
            .get(event.name())
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            if let Err(err) = handler.handle(event) {
                tracing::warn!(
                    event = event.name(),
                    handler = handler.name(),
                    error = %err,
                    "Event handler failed"
                );
            }
        }
        Ok(())
    }
}
