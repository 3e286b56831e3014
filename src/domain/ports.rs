use super::account::Account;
use crate::error::Result;
use async_trait::async_trait;

/// Read/write access to accounts, one account at a time.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Loads an account. A missing account is `Ok(None)`, not an error.
    async fn get(&self, account_number: &str) -> Result<Option<Account>>;
    /// Writes `account` back, inserting it if it does not exist yet.
    async fn update(&self, account: Account) -> Result<()>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;

/// Builds a fresh store handle on every call.
pub type AccountStoreFactory = Box<dyn Fn() -> AccountStoreBox + Send + Sync>;

/// Hands out the store that backs a single payment evaluation.
pub trait AccountStoreProvider: Send + Sync {
    fn acquire(&self) -> AccountStoreBox;
}

impl<F> AccountStoreProvider for F
where
    F: Fn() -> AccountStoreBox + Send + Sync,
{
    fn acquire(&self) -> AccountStoreBox {
        self()
    }
}
