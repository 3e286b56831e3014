use crate::domain::payment::{
    DeclineReason, MakePaymentRequest, MakePaymentResult, PaymentOutcome,
};
use crate::domain::ports::AccountStoreProvider;
use crate::error::Result;
use tracing::{debug, info, instrument};

/// Decides whether a payment may be debited and applies the debit.
///
/// `PaymentService` owns the store provider and acquires one store handle per
/// evaluation. The same handle serves the account read and, on approval, the
/// write-back, so a payment never reads from one backend and writes to another.
pub struct PaymentService {
    provider: Box<dyn AccountStoreProvider>,
}

impl PaymentService {
    /// Creates a new `PaymentService` over `provider`.
    pub fn new(provider: impl AccountStoreProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Evaluates `request` and reports only whether it went through.
    ///
    /// Every decline maps to `success == false`. Store failures are returned as
    /// errors.
    pub async fn make_payment(&self, request: MakePaymentRequest) -> Result<MakePaymentResult> {
        let outcome = self.evaluate(request).await?;
        Ok(MakePaymentResult::from(&outcome))
    }

    /// Evaluates `request`, debiting the debtor account if it is eligible.
    ///
    /// Invalid requests are declined before any store is acquired. Otherwise the
    /// store is read exactly once and written at most once, only on approval.
    #[instrument(
        skip_all,
        fields(
            debtor = %request.debtor_account_number,
            scheme = ?request.payment_scheme,
        )
    )]
    pub async fn evaluate(&self, request: MakePaymentRequest) -> Result<PaymentOutcome> {
        let instruction = match request.validate() {
            Ok(instruction) => instruction,
            Err(reason) => return Ok(declined(reason)),
        };

        let store = self.provider.acquire();

        let Some(mut account) = store.get(&instruction.debtor_account_number).await? else {
            return Ok(declined(DeclineReason::AccountNotFound(
                instruction.debtor_account_number,
            )));
        };

        if let Err(reason) = account.authorise(instruction.scheme, instruction.amount) {
            return Ok(declined(reason));
        }

        let balance = match account.debit(instruction.amount) {
            Ok(balance) => balance,
            Err(reason) => return Ok(declined(reason)),
        };
        store.update(account).await?;

        debug!(amount = %instruction.amount, %balance, "Payment approved");
        Ok(PaymentOutcome::Approved { balance })
    }
}

fn declined(reason: DeclineReason) -> PaymentOutcome {
    info!(%reason, "Payment declined");
    PaymentOutcome::Declined(reason)
}
