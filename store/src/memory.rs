//! In-memory `LedgerStore` backend.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{LedgerStore, StoreError};
use swell_types::HolderAddress;

/// Non-durable store backed by `HashMap`s.
///
/// Deterministic and filesystem-free; the backend used throughout the test
/// suites and by embedders that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    holders: RwLock<HashMap<String, Vec<u8>>>,
    meta: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("memory store lock poisoned".into())
    }
}

impl LedgerStore for MemoryStore {
    fn get_holder(&self, address: &HolderAddress) -> Result<Option<Vec<u8>>, StoreError> {
        let holders = self.holders.read().map_err(|_| Self::poisoned())?;
        Ok(holders.get(address.as_str()).cloned())
    }

    fn put_holder(&self, address: &HolderAddress, record: &[u8]) -> Result<(), StoreError> {
        let mut holders = self.holders.write().map_err(|_| Self::poisoned())?;
        holders.insert(address.as_str().to_owned(), record.to_vec());
        Ok(())
    }

    fn delete_holder(&self, address: &HolderAddress) -> Result<(), StoreError> {
        let mut holders = self.holders.write().map_err(|_| Self::poisoned())?;
        holders
            .remove(address.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(address.as_str().to_owned()))
    }

    fn iter_holders(&self) -> Result<Vec<(HolderAddress, Vec<u8>)>, StoreError> {
        let holders = self.holders.read().map_err(|_| Self::poisoned())?;
        Ok(holders
            .iter()
            .map(|(addr, bytes)| (HolderAddress::new(addr.clone()), bytes.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let meta = self.meta.read().map_err(|_| Self::poisoned())?;
        Ok(meta.get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut meta = self.meta.write().map_err(|_| Self::poisoned())?;
        meta.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
