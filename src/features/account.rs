use rust_decimal::prelude::*;
use std::fmt;
use thiserror::Error;

/// Four digit by convention, but nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Pin(i32);

impl Pin {
    pub fn new(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders an amount as `Rs.<value>` with at least one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rupees(pub Decimal);

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0.normalize();
        if amount.scale() == 0 {
            write!(f, "Rs.{amount}.0")
        } else {
            write!(f, "Rs.{amount}")
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum AccountError {
    #[error("Invalid deposit amount.")]
    InvalidDeposit(Decimal),

    #[error("Invalid withdrawal amount.")]
    InvalidWithdrawal(Decimal),

    #[error("Insufficient balance!")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Amount is too large for this account.")]
    AmountTooLarge(Decimal),
}

type AccountResult<T> = anyhow::Result<T, AccountError>;

pub(crate) const NO_TRANSACTIONS: &str = "No transactions yet.";

/// Customer Account
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pin: Pin,

    /// Never negative
    balance: Decimal,

    /// Description of the most recent successful deposit or withdrawal
    last_transaction: String,
}

impl Account {
    pub(crate) fn new(pin: Pin, balance: Decimal) -> Self {
        Self {
            pin,
            balance,
            last_transaction: NO_TRANSACTIONS.to_string(),
        }
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn verify_pin(&self, candidate: Pin) -> bool {
        self.pin == candidate
    }

    /// Returns the new balance.
    pub(crate) fn deposit(&mut self, amount: Decimal) -> AccountResult<Decimal> {
        if amount <= Decimal::ZERO {
            warn!("rejected deposit of {amount} for account {}", self.pin);
            return Err(AccountError::InvalidDeposit(amount));
        }

        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            warn!("deposit of {amount} overflows account {}", self.pin);
            AccountError::AmountTooLarge(amount)
        })?;
        self.last_transaction = format!("Deposited: {}", Rupees(amount));
        info!("account {} deposited {amount}", self.pin);
        Ok(self.balance)
    }

    /// Returns the new balance.
    pub(crate) fn withdraw(&mut self, amount: Decimal) -> AccountResult<Decimal> {
        if amount <= Decimal::ZERO {
            warn!("rejected withdrawal of {amount} for account {}", self.pin);
            return Err(AccountError::InvalidWithdrawal(amount));
        }
        if amount > self.balance {
            warn!(
                "account {} cannot withdraw {amount}, only {} available",
                self.pin, self.balance
            );
            return Err(AccountError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(AccountError::AmountTooLarge(amount))?;
        self.last_transaction = format!("Withdrew: {}", Rupees(amount));
        info!("account {} withdrew {amount}", self.pin);
        Ok(self.balance)
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn last_transaction(&self) -> &str {
        &self.last_transaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn demo() -> Account {
        Account::new(Pin::new(1234), dec!(10000))
    }

    #[test_case(dec!(500), dec!(10500), "Deposited: Rs.500.0" ; "whole amount")]
    #[test_case(dec!(0.25), dec!(10000.25), "Deposited: Rs.0.25" ; "fraction")]
    #[test_case(dec!(1000000000), dec!(1000010000), "Deposited: Rs.1000000000.0" ; "no upper bound")]
    fn deposit_adds_to_balance(amount: Decimal, expected: Decimal, description: &str) {
        let mut account = demo();
        assert_eq!(account.deposit(amount), Ok(expected));
        assert_eq!(account.balance(), expected);
        assert_eq!(account.last_transaction(), description);
    }

    #[test_case(dec!(0), AccountError::InvalidDeposit(dec!(0)) ; "zero")]
    #[test_case(dec!(-5), AccountError::InvalidDeposit(dec!(-5)) ; "negative")]
    #[test_case(Decimal::MAX, AccountError::AmountTooLarge(Decimal::MAX) ; "overflowing balance")]
    fn failed_deposit_leaves_account_untouched(amount: Decimal, error: AccountError) {
        let mut account = demo();
        assert_eq!(account.deposit(amount), Err(error));
        assert_eq!(account, demo());
        assert_eq!(account.last_transaction(), NO_TRANSACTIONS);
    }

    #[test_case(dec!(300), dec!(9700) ; "partial")]
    #[test_case(dec!(10000), dec!(0) ; "entire balance")]
    fn withdraw_subtracts_from_balance(amount: Decimal, expected: Decimal) {
        let mut account = demo();
        assert_eq!(account.withdraw(amount), Ok(expected));
        assert_eq!(account.balance(), expected);
        assert_eq!(
            account.last_transaction(),
            format!("Withdrew: {}", Rupees(amount))
        );
    }

    #[test_case(dec!(0), AccountError::InvalidWithdrawal(dec!(0)) ; "zero")]
    #[test_case(dec!(-1), AccountError::InvalidWithdrawal(dec!(-1)) ; "negative")]
    #[test_case(
        dec!(20000),
        AccountError::InsufficientBalance { requested: dec!(20000), available: dec!(10000) }
        ; "more than balance"
    )]
    fn failed_withdrawal_leaves_account_untouched(amount: Decimal, error: AccountError) {
        let mut account = demo();
        assert_eq!(account.withdraw(amount), Err(error));
        assert_eq!(account, demo());
        assert_eq!(account.last_transaction(), NO_TRANSACTIONS);
    }

    #[test]
    fn error_messages_match_atm_wording() {
        assert_eq!(
            AccountError::InvalidDeposit(dec!(0)).to_string(),
            "Invalid deposit amount."
        );
        assert_eq!(
            AccountError::InvalidWithdrawal(dec!(0)).to_string(),
            "Invalid withdrawal amount."
        );
        let insufficient = AccountError::InsufficientBalance {
            requested: dec!(2),
            available: dec!(1),
        };
        assert_eq!(insufficient.to_string(), "Insufficient balance!");
    }

    #[test]
    fn verify_pin_compares_against_own_pin() {
        let account = demo();
        assert!(account.verify_pin(Pin::new(1234)));
        assert!(!account.verify_pin(Pin::new(4321)));
    }

    #[test_case(dec!(10500), "Rs.10500.0")]
    #[test_case(dec!(10.50), "Rs.10.5")]
    #[test_case(dec!(0.25), "Rs.0.25")]
    #[test_case(dec!(0), "Rs.0.0")]
    fn rupees_keep_one_fractional_digit(amount: Decimal, rendered: &str) {
        assert_eq!(Rupees(amount).to_string(), rendered);
    }
}
