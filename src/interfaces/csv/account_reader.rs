use crate::domain::account::Account;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads account seed records from a CSV source.
///
/// Header: `account_number,balance,status,allowed_payment_schemes`, where the
/// schemes cell is a `|`-separated list such as `bacs|chaps`.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    pub fn accounts(self) -> impl Iterator<Item = Result<Account>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
