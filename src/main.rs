use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paygate::application::payment_service::PaymentService;
use paygate::config::Config;
use paygate::domain::ports::{AccountStoreBox, AccountStoreFactory, AccountStoreProvider};
use paygate::infrastructure::in_memory::InMemoryAccountStore;
#[cfg(feature = "storage-rocksdb")]
use paygate::infrastructure::rocksdb::RocksDBStore;
use paygate::infrastructure::provider::ConfiguredStoreProvider;
use paygate::interfaces::csv::account_reader::AccountReader;
use paygate::interfaces::csv::payment_reader::PaymentReader;
use paygate::interfaces::csv::result_writer::PaymentResultWriter;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let config = Config::parse();

    let (primary, backup) = open_stores(config.db_path.as_deref())?;
    let provider = ConfiguredStoreProvider::new(primary, backup, config.data_store_type);

    if let Some(accounts) = &config.accounts {
        seed_accounts(&provider, accounts).await?;
    }

    let service = PaymentService::new(provider);

    let file = File::open(&config.payments).into_diagnostic()?;
    let reader = PaymentReader::new(file);
    let stdout = io::stdout();
    let mut writer = PaymentResultWriter::new(stdout.lock());

    for request in reader.payments() {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "Error reading payment");
                continue;
            }
        };

        match service.make_payment(request.clone()).await {
            Ok(result) => writer.write_result(&request, result).into_diagnostic()?,
            Err(e) => error!(error = %e, "Error processing payment"),
        }
    }

    writer.flush().into_diagnostic()?;

    Ok(())
}

/// Writes every readable account in `path` into the store the provider selects.
async fn seed_accounts(provider: &ConfiguredStoreProvider, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let store = provider.acquire();

    let mut seeded = 0usize;
    for account in AccountReader::new(file).accounts() {
        match account {
            Ok(account) => {
                store.update(account).await.into_diagnostic()?;
                seeded += 1;
            }
            Err(e) => error!(error = %e, "Error reading account"),
        }
    }

    info!(
        seeded,
        store = %provider.data_store_type(),
        "Seeded accounts"
    );
    Ok(())
}

fn in_memory_stores() -> (AccountStoreFactory, AccountStoreFactory) {
    let primary = InMemoryAccountStore::new();
    let backup = InMemoryAccountStore::new();
    (
        Box::new(move || Box::new(primary.clone()) as AccountStoreBox),
        Box::new(move || Box::new(backup.clone()) as AccountStoreBox),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<&Path>) -> Result<(AccountStoreFactory, AccountStoreFactory)> {
    let Some(db_path) = db_path else {
        return Ok(in_memory_stores());
    };

    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    let primary = store.primary();
    let backup = store.backup();

    Ok((
        Box::new(move || Box::new(primary.clone()) as AccountStoreBox),
        Box::new(move || Box::new(backup.clone()) as AccountStoreBox),
    ))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<&Path>) -> Result<(AccountStoreFactory, AccountStoreFactory)> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_stores())
}
