//! Shared utilities for the SWELL workspace.

pub mod logging;

pub use logging::init_tracing;
