use super::account::{AccountStatus, Amount, Balance};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The payment rail a request is sent through.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PaymentScheme {
    Bacs,
    FasterPayments,
    Chaps,
}

impl PaymentScheme {
    pub const ALL: [PaymentScheme; 3] = [Self::Bacs, Self::FasterPayments, Self::Chaps];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bacs => "bacs",
            Self::FasterPayments => "faster_payments",
            Self::Chaps => "chaps",
        }
    }
}

impl fmt::Display for PaymentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment scheme '{0}'")]
pub struct UnknownScheme(pub String);

impl FromStr for PaymentScheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

/// An inbound instruction to debit `debtor_account_number`.
///
/// Fields are as loose as the callers send them; [`MakePaymentRequest::validate`]
/// turns a request into a [`PaymentInstruction`] or rejects it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct MakePaymentRequest {
    /// Carried through but never used or validated.
    pub creditor_account_number: Option<String>,
    pub debtor_account_number: String,
    pub amount: Option<Decimal>,
    pub payment_date: DateTime<Utc>,
    pub payment_scheme: Option<PaymentScheme>,
}

/// A request that passed shape validation.
#[derive(Debug, PartialEq, Clone)]
pub struct PaymentInstruction {
    pub debtor_account_number: String,
    pub amount: Amount,
    pub scheme: PaymentScheme,
}

impl MakePaymentRequest {
    pub fn validate(&self) -> Result<PaymentInstruction, DeclineReason> {
        if self.debtor_account_number.trim().is_empty() {
            return Err(DeclineReason::InvalidRequest(
                "debtor account number is required".to_string(),
            ));
        }

        let amount = self
            .amount
            .ok_or_else(|| DeclineReason::InvalidRequest("amount is required".to_string()))
            .and_then(|value| {
                Amount::new(value).map_err(|e| DeclineReason::InvalidRequest(e.to_string()))
            })?;

        let scheme = self.payment_scheme.ok_or_else(|| {
            DeclineReason::InvalidRequest("payment scheme is required".to_string())
        })?;

        Ok(PaymentInstruction {
            debtor_account_number: self.debtor_account_number.clone(),
            amount,
            scheme,
        })
    }
}

/// Why a payment was turned down.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum DeclineReason {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("account '{0}' not found")]
    AccountNotFound(String),
    #[error("scheme {0} is not allowed for this account")]
    SchemeNotAllowed(PaymentScheme),
    #[error("insufficient funds: balance {balance}, requested {amount}")]
    InsufficientFunds { balance: Balance, amount: Amount },
    #[error("account is not live ({0:?})")]
    AccountNotLive(AccountStatus),
    #[error("debiting {amount} from balance {balance} is out of range")]
    BalanceOutOfRange { balance: Balance, amount: Amount },
}

/// Detailed result of evaluating a payment.
#[derive(Debug, PartialEq, Clone)]
pub enum PaymentOutcome {
    /// The debit was applied; carries the balance after it.
    Approved { balance: Balance },
    Declined(DeclineReason),
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct MakePaymentResult {
    pub success: bool,
}

impl From<&PaymentOutcome> for MakePaymentResult {
    fn from(outcome: &PaymentOutcome) -> Self {
        Self {
            success: outcome.is_approved(),
        }
    }
}
