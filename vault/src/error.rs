//! Vault-specific errors.

use swell_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("outbound asset transfer failed: {0}")]
    TransferFailed(String),

    #[error("vault reserve too low: need {needed}, reserve {reserve}")]
    InsufficientReserve { needed: u128, reserve: u128 },
}
