//! Ledger-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("caller {0} is not authorized for this operation")]
    Unauthorized(String),

    #[error("global rate may not decrease: current {current}, proposed {proposed}")]
    RateDirectionViolation { current: u128, proposed: u128 },

    #[error("arithmetic overflow in interest computation")]
    Overflow,

    #[error("{0}")]
    Other(String),
}
