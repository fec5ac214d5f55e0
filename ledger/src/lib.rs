//! The SWELL accrual ledger — a yield-bearing balance engine.
//!
//! Balances grow continuously with time at a per-holder frozen interest rate:
//! `effective = principal × (PRECISION + rate × Δt) / PRECISION`
//!
//! There is no background process touching accounts each period. Every
//! mutating operation first *settles* the touched holders — folds interest
//! accrued since their last touchpoint into principal — then applies its
//! delta. This crate handles:
//! - Effective-balance computation from principal, rate, and elapsed time
//! - Settlement (crystallizing accrued interest at every touchpoint)
//! - Mint/burn/transfer with rate freezing and propagation
//! - The monotone global-rate policy
//! - Persistence of holder state through the store traits

pub mod engine;
pub mod error;
pub mod event;
pub mod holder;
pub mod math;

pub use engine::LedgerEngine;
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use holder::HolderRecord;
