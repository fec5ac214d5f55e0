use crate::StoreError;
use swell_types::HolderAddress;

/// Store trait for persisting accrual-ledger state to durable storage.
///
/// Uses opaque `Vec<u8>` values so the store doesn't depend on the
/// `swell-ledger` crate (which would create a circular dependency). The
/// ledger engine serializes/deserializes its own types.
pub trait LedgerStore {
    fn get_holder(&self, address: &HolderAddress) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_holder(&self, address: &HolderAddress, record: &[u8]) -> Result<(), StoreError>;
    fn delete_holder(&self, address: &HolderAddress) -> Result<(), StoreError>;
    fn iter_holders(&self) -> Result<Vec<(HolderAddress, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
