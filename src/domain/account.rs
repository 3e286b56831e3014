use super::payment::{DeclineReason, PaymentScheme};
use crate::error::PaymentError;
use bitflags::bitflags;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest amount a payment may carry.
pub const MIN_AMOUNT: Decimal = dec!(0.01);

/// Signed monetary value held by an account.
///
/// A thin wrapper around `rust_decimal::Decimal`. It may go negative: only some
/// schemes check funds before a debit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

/// A payment amount, guaranteed to be at least [`MIN_AMOUNT`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value >= MIN_AMOUNT {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(format!(
                "Amount must be at least {MIN_AMOUNT}, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// True if the balance can fund `amount` without going below zero.
    pub fn covers(&self, amount: Amount) -> bool {
        self.0 >= amount.value()
    }

    /// Subtracts `amount`, or returns `None` if the result leaves `Decimal`'s range.
    pub fn checked_sub(&self, amount: Amount) -> Option<Self> {
        self.0.checked_sub(amount.value()).map(Self)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Live,
    Disabled,
    InboundPaymentsOnly,
}

bitflags! {
    /// The set of schemes an account may send payments through.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AllowedPaymentSchemes: u8 {
        const BACS = 1 << 0;
        const FASTER_PAYMENTS = 1 << 1;
        const CHAPS = 1 << 2;
    }
}

impl From<PaymentScheme> for AllowedPaymentSchemes {
    fn from(scheme: PaymentScheme) -> Self {
        match scheme {
            PaymentScheme::Bacs => Self::BACS,
            PaymentScheme::FasterPayments => Self::FASTER_PAYMENTS,
            PaymentScheme::Chaps => Self::CHAPS,
        }
    }
}

impl AllowedPaymentSchemes {
    pub fn permits(&self, scheme: PaymentScheme) -> bool {
        self.contains(scheme.into())
    }
}

// Stored and exchanged as a `|`-separated list of scheme names, e.g. "bacs|chaps".
impl Serialize for AllowedPaymentSchemes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names: Vec<&str> = PaymentScheme::ALL
            .iter()
            .filter(|scheme| self.permits(**scheme))
            .map(|scheme| scheme.as_str())
            .collect();
        serializer.serialize_str(&names.join("|"))
    }
}

impl<'de> Deserialize<'de> for AllowedPaymentSchemes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.split('|')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(Self::empty(), |acc, name| {
                let scheme: PaymentScheme = name
                    .parse()
                    .map_err(<D::Error as de::Error>::custom)?;
                Ok(acc | scheme.into())
            })
    }
}

/// The debtor's financial record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    account_number: String,
    balance: Balance,
    pub status: AccountStatus,
    pub allowed_payment_schemes: AllowedPaymentSchemes,
}

impl Account {
    pub fn new(
        account_number: impl Into<String>,
        balance: Balance,
        status: AccountStatus,
        allowed_payment_schemes: AllowedPaymentSchemes,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            balance,
            status,
            allowed_payment_schemes,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Checks whether `amount` may leave this account through `scheme`.
    ///
    /// Bacs only requires the scheme to be allowed: it does not look at the
    /// balance, so an approved Bacs debit can take the account overdrawn.
    pub fn authorise(&self, scheme: PaymentScheme, amount: Amount) -> Result<(), DeclineReason> {
        if !self.allowed_payment_schemes.permits(scheme) {
            return Err(DeclineReason::SchemeNotAllowed(scheme));
        }

        match scheme {
            PaymentScheme::Bacs => Ok(()),
            PaymentScheme::FasterPayments if !self.balance.covers(amount) => {
                Err(DeclineReason::InsufficientFunds {
                    balance: self.balance,
                    amount,
                })
            }
            PaymentScheme::FasterPayments => Ok(()),
            PaymentScheme::Chaps if self.status != AccountStatus::Live => {
                Err(DeclineReason::AccountNotLive(self.status))
            }
            PaymentScheme::Chaps => Ok(()),
        }
    }

    /// Removes `amount` from the balance and returns the new balance.
    ///
    /// No floor is applied here. The balance is left untouched if the result
    /// would fall outside the representable range.
    pub fn debit(&mut self, amount: Amount) -> Result<Balance, DeclineReason> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(DeclineReason::BalanceOutOfRange {
                balance: self.balance,
                amount,
            })?;
        Ok(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(balance: Decimal, status: AccountStatus, allowed: AllowedPaymentSchemes) -> Account {
        Account::new("A-1", Balance::new(balance), status, allowed)
    }

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_balance_arithmetic() {
        let b1 = Balance::new(dec!(10.0));
        let b2 = Balance::new(dec!(5.0));
        assert_eq!(b1.checked_sub(amount(dec!(5.0))), Some(Balance::new(dec!(5.0))));
        assert_eq!(Balance::new(Decimal::MIN).checked_sub(amount(dec!(1))), None);
        assert!(b1.covers(amount(dec!(10.0))));
        assert!(!b2.covers(amount(dec!(10.0))));
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(Amount::new(MIN_AMOUNT).is_ok());
        for invalid in [dec!(0.0), dec!(-1.0), dec!(0.0001), dec!(0.009)] {
            assert!(matches!(
                Amount::new(invalid),
                Err(PaymentError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_allowed_schemes_combine() {
        let allowed = AllowedPaymentSchemes::BACS | AllowedPaymentSchemes::CHAPS;
        assert!(allowed.permits(PaymentScheme::Bacs));
        assert!(allowed.permits(PaymentScheme::Chaps));
        assert!(!allowed.permits(PaymentScheme::FasterPayments));
        assert!(!AllowedPaymentSchemes::empty().permits(PaymentScheme::Bacs));
    }

    #[test]
    fn test_allowed_schemes_serialization() {
        let allowed = AllowedPaymentSchemes::BACS | AllowedPaymentSchemes::FASTER_PAYMENTS;
        let json = serde_json::to_string(&allowed).unwrap();
        assert_eq!(json, "\"bacs|faster_payments\"");

        let parsed: AllowedPaymentSchemes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, allowed);

        let none: AllowedPaymentSchemes = serde_json::from_str("\"\"").unwrap();
        assert!(none.is_empty());

        assert!(serde_json::from_str::<AllowedPaymentSchemes>("\"swift\"").is_err());
    }

    #[test]
    fn test_account_status_serialization() {
        let json = serde_json::to_string(&AccountStatus::InboundPaymentsOnly).unwrap();
        assert_eq!(json, "\"inbound_payments_only\"");
    }

    #[test]
    fn test_bacs_ignores_balance_and_status() {
        let acc = account(
            dec!(0),
            AccountStatus::Disabled,
            AllowedPaymentSchemes::BACS,
        );
        assert!(acc.authorise(PaymentScheme::Bacs, amount(dec!(10))).is_ok());
    }

    #[test]
    fn test_faster_payments_requires_funds() {
        let acc = account(
            dec!(50),
            AccountStatus::Live,
            AllowedPaymentSchemes::FASTER_PAYMENTS,
        );
        assert!(
            acc.authorise(PaymentScheme::FasterPayments, amount(dec!(50)))
                .is_ok()
        );
        assert!(matches!(
            acc.authorise(PaymentScheme::FasterPayments, amount(dec!(50.01))),
            Err(DeclineReason::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_chaps_requires_live_status() {
        for status in [AccountStatus::Disabled, AccountStatus::InboundPaymentsOnly] {
            let acc = account(dec!(100), status, AllowedPaymentSchemes::CHAPS);
            assert_eq!(
                acc.authorise(PaymentScheme::Chaps, amount(dec!(10))),
                Err(DeclineReason::AccountNotLive(status))
            );
        }
        let live = account(dec!(100), AccountStatus::Live, AllowedPaymentSchemes::CHAPS);
        assert!(live.authorise(PaymentScheme::Chaps, amount(dec!(10))).is_ok());
    }

    #[test]
    fn test_scheme_flag_checked_first() {
        let acc = account(dec!(100), AccountStatus::Disabled, AllowedPaymentSchemes::BACS);
        assert_eq!(
            acc.authorise(PaymentScheme::Chaps, amount(dec!(10))),
            Err(DeclineReason::SchemeNotAllowed(PaymentScheme::Chaps))
        );
    }

    #[test]
    fn test_account_debit() {
        let mut acc = account(dec!(10), AccountStatus::Live, AllowedPaymentSchemes::BACS);
        assert_eq!(acc.debit(amount(dec!(25))), Ok(Balance::new(dec!(-15))));
        assert_eq!(acc.balance(), Balance::new(dec!(-15)));
        assert_eq!(acc.account_number(), "A-1");
    }

    #[test]
    fn test_debit_out_of_range_leaves_balance() {
        let mut acc = account(Decimal::MIN, AccountStatus::Live, AllowedPaymentSchemes::BACS);
        assert_eq!(
            acc.debit(amount(dec!(1))),
            Err(DeclineReason::BalanceOutOfRange {
                balance: Balance::new(Decimal::MIN),
                amount: amount(dec!(1)),
            })
        );
        assert_eq!(acc.balance(), Balance::new(Decimal::MIN));
    }
}
