//! Seam to the underlying asset custody.
//!
//! The vault tracks its reserve as an integer; actually moving the asset to
//! a redeemer happens behind `AssetBackend`. The outbound transfer is the
//! one vault step with an external failure mode, so it gets a trait seam
//! that tests can drive deterministically.

use swell_types::HolderAddress;
use thiserror::Error;

/// Raised by an asset backend when the recipient rejects an outbound
/// transfer.
#[derive(Debug, Error)]
#[error("asset transfer to {recipient} rejected: {reason}")]
pub struct AssetRejected {
    pub recipient: HolderAddress,
    pub reason: String,
}

/// Outbound side of the vault's asset custody.
pub trait AssetBackend {
    /// Send `amount` of the underlying asset to `to`.
    fn transfer_out(&mut self, to: &HolderAddress, amount: u128) -> Result<(), AssetRejected>;
}

/// Backend that accepts every transfer — the asset simply leaves the
/// system. Suitable for embedders whose custody never rejects, and as the
/// default test double.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinkBackend;

impl AssetBackend for SinkBackend {
    fn transfer_out(&mut self, _to: &HolderAddress, _amount: u128) -> Result<(), AssetRejected> {
        Ok(())
    }
}
