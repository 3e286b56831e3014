use clap::Parser;
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which account store backs payment evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataStoreType {
    #[default]
    Primary,
    Backup,
}

/// Only `backup` (in any letter case) selects the backup store; every other
/// value falls through to the primary one.
impl FromStr for DataStoreType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("backup") {
            Ok(Self::Backup)
        } else {
            Ok(Self::Primary)
        }
    }
}

impl fmt::Display for DataStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Backup => f.write_str("backup"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Payment requests CSV file
    pub payments: PathBuf,

    /// Accounts CSV file used to seed the selected store before processing
    #[arg(long)]
    pub accounts: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Account store to evaluate payments against
    #[arg(long, env = "DATA_STORE_TYPE", default_value = "primary")]
    pub data_store_type: DataStoreType,
}
