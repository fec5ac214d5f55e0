//! Observable ledger events for off-chain consumers.

use serde::{Deserialize, Serialize};
use swell_types::HolderAddress;

/// A state change worth surfacing to observers.
///
/// Events accumulate in the engine and are drained by the embedder
/// (`LedgerEngine::drain_events`); a failed operation emits nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    RateChanged {
        new_rate: u128,
    },
    Minted {
        to: HolderAddress,
        amount: u128,
    },
    Burned {
        from: HolderAddress,
        amount: u128,
    },
    Transferred {
        from: HolderAddress,
        to: HolderAddress,
        amount: u128,
    },
}
