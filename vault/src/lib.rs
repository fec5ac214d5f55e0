//! The SWELL exchange vault.
//!
//! Exchanges a base asset for ledger credits 1:1 and reverses the exchange
//! on demand. The vault holds the asset reserve, mints on deposit, burns on
//! redemption, and compensates the burn if the outbound asset transfer is
//! rejected. It has no accrual logic of its own — interest semantics live
//! entirely in `swell-ledger`.

pub mod assets;
pub mod engine;
pub mod error;
pub mod event;

pub use assets::{AssetBackend, AssetRejected, SinkBackend};
pub use engine::Vault;
pub use error::VaultError;
pub use event::VaultEvent;
