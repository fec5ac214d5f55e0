//! Holder address type with `swl_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A SWELL holder address, always prefixed with `swl_`.
///
/// Identifies a principal on the ledger: a depositor, the vault itself, or
/// the owner capability. The ledger keys all holder state by this type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderAddress(String);

impl HolderAddress {
    /// The standard prefix for all SWELL holder addresses.
    pub const PREFIX: &'static str = "swl_";

    /// Create a new holder address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `swl_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with swl_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for HolderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HolderAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
