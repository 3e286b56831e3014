use crate::domain::payment::{MakePaymentRequest, MakePaymentResult, PaymentScheme};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct PaymentRecord<'a> {
    debtor_account_number: &'a str,
    payment_scheme: Option<PaymentScheme>,
    amount: Option<Decimal>,
    success: bool,
}

/// Writes one CSV row per evaluated payment.
pub struct PaymentResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_result(
        &mut self,
        request: &MakePaymentRequest,
        result: MakePaymentResult,
    ) -> Result<()> {
        self.writer.serialize(PaymentRecord {
            debtor_account_number: &request.debtor_account_number,
            payment_scheme: request.payment_scheme,
            amount: request.amount,
            success: result.success,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
