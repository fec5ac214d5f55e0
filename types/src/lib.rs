//! Fundamental types for the SWELL ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: holder addresses, timestamps, fixed-point amount conventions,
//! and protocol parameters.

pub mod address;
pub mod amount;
pub mod params;
pub mod time;

pub use address::HolderAddress;
pub use amount::{AmountSpec, PRECISION, TOKEN_UNIT};
pub use params::LedgerParams;
pub use time::Timestamp;
