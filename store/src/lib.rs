//! Abstract storage for SWELL ledger state.
//!
//! Durable backends implement `LedgerStore`; the rest of the workspace
//! depends only on the trait. `MemoryStore` is the in-memory implementation
//! used by tests and embedders that manage their own durability.

pub mod error;
pub mod ledger;
pub mod memory;

pub use error::StoreError;
pub use ledger::LedgerStore;
pub use memory::MemoryStore;
