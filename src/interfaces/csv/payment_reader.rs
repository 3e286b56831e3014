use crate::domain::payment::MakePaymentRequest;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads payment requests from a CSV source.
///
/// Expected header:
/// `debtor_account_number,creditor_account_number,amount,payment_scheme,payment_date`.
/// Empty `amount` or `payment_scheme` cells become `None` and are declined by the
/// service; a scheme name that is not recognised fails the row here.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    /// Lazily deserializes one request per row.
    pub fn payments(self) -> impl Iterator<Item = Result<MakePaymentRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
