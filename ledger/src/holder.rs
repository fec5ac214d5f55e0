//! Per-holder accrual state.

use serde::{Deserialize, Serialize};
use swell_types::{Timestamp, PRECISION};

use crate::math::mul_div;

/// Accrual state for a single holder.
///
/// `principal` only moves through mint/burn/transfer — it never grows by
/// itself. Interest accrued since `last_settled` exists only as a derived
/// quantity until the next settlement folds it in. Records are created on
/// first inflow and never deleted, even at zero balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderRecord {
    /// Stored balance actually credited (raw units, 18 decimals).
    pub principal: u128,

    /// Interest rate frozen at this holder's last zero-to-nonzero
    /// transition (`PRECISION`-scaled, per second). Carries no meaning
    /// while `principal == 0`; the next inflow overwrites it.
    pub frozen_rate: u128,

    /// When this holder was last settled.
    pub last_settled: Timestamp,
}

impl HolderRecord {
    /// Fresh record for a holder touched for the first time at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            principal: 0,
            frozen_rate: 0,
            last_settled: now,
        }
    }

    /// Interest accrued since the last settlement:
    /// `principal × frozen_rate × Δt / PRECISION`. Simple interest — Δt
    /// resets at every settlement, so realized interest never itself
    /// accrues a second time within one settlement window.
    ///
    /// The multiply runs at 256 bits (`mul_div`); a plain `u128` product
    /// would overflow at a few hundred whole tokens of principal. `None`
    /// only when the result itself exceeds `u128`.
    fn accrued_interest_checked(&self, now: Timestamp) -> Option<u128> {
        let elapsed = self.last_settled.elapsed_since(now) as u128;
        let growth = self.frozen_rate.checked_mul(elapsed)?;
        mul_div(self.principal, growth, PRECISION)
    }

    /// Effective balance: principal plus interest accrued since the last
    /// settlement. Multiply before divide so sub-unit rates don't truncate
    /// to zero; never below principal.
    pub fn effective_balance_checked(&self, now: Timestamp) -> Option<u128> {
        self.principal.checked_add(self.accrued_interest_checked(now)?)
    }

    /// Effective balance, returning 0 on overflow.
    pub fn effective_balance(&self, now: Timestamp) -> u128 {
        self.effective_balance_checked(now).unwrap_or(0)
    }

    /// Fold accrued interest into principal and restamp the accrual clock.
    /// Returns the realized delta; `None` on overflow (state untouched).
    ///
    /// Idempotent: settling twice at the same timestamp realizes the delta
    /// exactly once.
    pub fn settle(&mut self, now: Timestamp) -> Option<u128> {
        let effective = self.effective_balance_checked(now)?;
        let delta = effective - self.principal;
        self.principal = effective;
        self.last_settled = now;
        Some(delta)
    }
}
