use std::fs::File;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use wallet_ledger::bin_utils::{OperationError, Service};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| match err {
            // rejected transfers are business outcomes, not broken input
            OperationError::UseCase(err) => {
                tracing::warn!(line, error = %err, "Operation rejected")
            }
            err => eprintln!("Error at line {line}: {err}"),
        }),
    };
    service.run()
}
