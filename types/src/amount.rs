//! Fixed-point amount conventions.
//!
//! Balances and rates are raw `u128` integers to avoid floating-point errors.
//! One whole token is `TOKEN_UNIT` raw units (18 decimals); interest rates
//! are scaled by `PRECISION` and expressed per second.

use serde::{Deserialize, Serialize};

/// Fixed-point scaling factor for rates and interest factors (1e18).
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Raw units in one whole token (18-decimals convention).
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

/// Amount selector for operations that accept a "full balance" request.
///
/// Replaces the magic max-value sentinel: `All` is resolved to the concrete
/// post-settlement balance at the start of the operation, before any state
/// mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountSpec {
    /// The caller's entire balance at the moment of the operation.
    All,
    /// An exact raw amount.
    Exact(u128),
}

impl AmountSpec {
    /// Resolve to a concrete raw amount given the full available balance.
    pub fn resolve(self, full_balance: u128) -> u128 {
        match self {
            AmountSpec::All => full_balance,
            AmountSpec::Exact(raw) => raw,
        }
    }
}
