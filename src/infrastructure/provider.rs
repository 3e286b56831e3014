use crate::config::DataStoreType;
use crate::domain::ports::{AccountStoreBox, AccountStoreFactory, AccountStoreProvider};
use tracing::trace;

/// Chooses between a primary and a backup account store.
///
/// The choice is fixed when the provider is built; every `acquire` builds a new
/// handle from the selected factory.
pub struct ConfiguredStoreProvider {
    primary: AccountStoreFactory,
    backup: AccountStoreFactory,
    data_store_type: DataStoreType,
}

impl ConfiguredStoreProvider {
    pub fn new(
        primary: AccountStoreFactory,
        backup: AccountStoreFactory,
        data_store_type: DataStoreType,
    ) -> Self {
        Self {
            primary,
            backup,
            data_store_type,
        }
    }

    pub fn data_store_type(&self) -> DataStoreType {
        self.data_store_type
    }
}

impl AccountStoreProvider for ConfiguredStoreProvider {
    fn acquire(&self) -> AccountStoreBox {
        trace!(store = %self.data_store_type, "Acquiring account store");
        match self.data_store_type {
            DataStoreType::Primary => (self.primary)(),
            DataStoreType::Backup => (self.backup)(),
        }
    }
}
