use crate::domain::account::Account;
use crate::domain::ports::AccountStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the primary copy of every account.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family holding the backup copy of every account.
pub const CF_BACKUP_ACCOUNTS: &str = "backup_accounts";

/// A persistent account store backed by RocksDB.
///
/// One database holds both the primary and the backup account sets in separate
/// Column Families. A `RocksDBStore` value is a view onto one of them; `Clone`
/// shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    cf: &'static str,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at `path` and returns a view onto the
    /// primary accounts.
    ///
    /// Ensures that both account column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_backup = ColumnFamilyDescriptor::new(CF_BACKUP_ACCOUNTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_backup])?;

        Ok(Self {
            db: Arc::new(db),
            cf: CF_ACCOUNTS,
        })
    }

    /// A view onto the primary accounts of the same database.
    pub fn primary(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            cf: CF_ACCOUNTS,
        }
    }

    /// A view onto the backup accounts of the same database.
    pub fn backup(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            cf: CF_BACKUP_ACCOUNTS,
        }
    }

    fn column_family(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(self.cf).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(format!(
                "Column family '{}' not found",
                self.cf
            ))))
        })
    }
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn get(&self, account_number: &str) -> Result<Option<Account>> {
        let cf = self.column_family()?;

        let result = self.db.get_cf(cf, account_number.as_bytes())?;

        if let Some(bytes) = result {
            let account = serde_json::from_slice(&bytes).map_err(|e| {
                PaymentError::InternalError(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Deserialization error: {}", e),
                )))
            })?;
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    async fn update(&self, account: Account) -> Result<()> {
        let cf = self.column_family()?;

        let value = serde_json::to_vec(&account).map_err(|e| {
            PaymentError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(cf, account.account_number().as_bytes(), value)?;

        Ok(())
    }
}
