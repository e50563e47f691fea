/// Account balances and the credit/debit primitives that move them.
/// Invalid amounts are silently ignored at this level.
pub mod account;

/// Clients and the accounts attached to them.
pub mod client;

/// Transfers between two accounts: validate, then debit and credit.
pub mod transaction;

/// Storage interfaces consumed by the use cases, plus in-memory
/// implementations.
pub mod gateway;

/// Domain events emitted after a transfer is persisted.
pub mod event;

/// Per-account mutual exclusion for transfers.
pub mod lock;

/// Orchestration of lookups, transfers, persistence and notification.
pub mod usecase;

/// Bootstraps the library from a CSV batch file. Lives here rather than in
/// the binary so the integration tests can drive it.
pub mod bin_utils;
