//! Concrete account stores and the provider that chooses between them.

pub mod in_memory;
pub mod provider;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
