//! Protocol parameters for the SWELL ledger.

use crate::amount::PRECISION;
use serde::{Deserialize, Serialize};

/// Launch configuration for a ledger instance.
///
/// The ledger is defined by a single tunable: the interest rate offered to
/// new depositors. Everything else (precision, decimals) is a protocol
/// constant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Interest rate offered to new depositors at genesis, in
    /// `PRECISION`-scaled units per second. Existing holders keep the rate
    /// frozen at their last zero-to-nonzero transition.
    pub initial_global_rate: u128,
}

impl LedgerParams {
    /// 5e10 raw per second — 5e-8 of principal per second, roughly 0.43% of
    /// principal per day in simple interest.
    pub const RATE_5E10: u128 = 50_000_000_000;

    /// SWELL defaults — the intended launch configuration.
    pub fn swell_defaults() -> Self {
        Self {
            initial_global_rate: Self::RATE_5E10,
        }
    }
}

/// Default is the SWELL launch configuration.
impl Default for LedgerParams {
    fn default() -> Self {
        Self::swell_defaults()
    }
}

/// Compile-time sanity: the default rate must be a sub-unit fraction of
/// `PRECISION`, or a one-second accrual would exceed the principal.
const _: () = assert!(LedgerParams::RATE_5E10 < PRECISION);
