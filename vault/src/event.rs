//! Observable vault events for off-chain consumers.

use serde::{Deserialize, Serialize};
use swell_types::HolderAddress;

/// Deposit/redemption records, drained by the embedder
/// (`Vault::drain_events`); a failed operation emits nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    Deposited { user: HolderAddress, amount: u128 },
    Redeemed { user: HolderAddress, amount: u128 },
    RewardsAdded { amount: u128 },
}
