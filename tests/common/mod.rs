#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use paygate::domain::account::{Account, AccountStatus, AllowedPaymentSchemes, Balance};
use paygate::domain::payment::{MakePaymentRequest, PaymentScheme};
use paygate::domain::ports::{AccountStore, AccountStoreBox, AccountStoreProvider};
use paygate::error::Result;
use paygate::infrastructure::in_memory::InMemoryAccountStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Call counts shared between a [`RecordingProvider`] and every store it hands out.
#[derive(Default)]
pub struct Calls {
    pub acquires: AtomicUsize,
    pub gets: AtomicUsize,
    pub updates: AtomicUsize,
}

impl Calls {
    pub fn acquires(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

/// An in-memory store that counts reads and writes.
pub struct RecordingStore {
    inner: InMemoryAccountStore,
    calls: Arc<Calls>,
}

#[async_trait]
impl AccountStore for RecordingStore {
    async fn get(&self, account_number: &str) -> Result<Option<Account>> {
        self.calls.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(account_number).await
    }

    async fn update(&self, account: Account) -> Result<()> {
        self.calls.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(account).await
    }
}

/// Hands out [`RecordingStore`]s over one shared in-memory store.
#[derive(Clone)]
pub struct RecordingProvider {
    pub store: InMemoryAccountStore,
    pub calls: Arc<Calls>,
}

impl RecordingProvider {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            store: InMemoryAccountStore::with_accounts(accounts),
            calls: Arc::new(Calls::default()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<Account>::new())
    }

    pub async fn balance(&self, account_number: &str) -> Balance {
        self.store
            .get(account_number)
            .await
            .unwrap()
            .expect("account should exist")
            .balance()
    }
}

impl AccountStoreProvider for RecordingProvider {
    fn acquire(&self) -> AccountStoreBox {
        self.calls.acquires.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingStore {
            inner: self.store.clone(),
            calls: Arc::clone(&self.calls),
        })
    }
}

pub fn account(
    number: &str,
    balance: Decimal,
    status: AccountStatus,
    allowed: AllowedPaymentSchemes,
) -> Account {
    Account::new(number, Balance::new(balance), status, allowed)
}

pub fn request(debtor: &str, amount: Decimal, scheme: PaymentScheme) -> MakePaymentRequest {
    MakePaymentRequest {
        creditor_account_number: None,
        debtor_account_number: debtor.to_string(),
        amount: Some(amount),
        payment_date: Utc::now(),
        payment_scheme: Some(scheme),
    }
}
