use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use thiserror::Error;

use super::account::{Account, Pin};

#[derive(Error, Debug, PartialEq)]
pub(crate) enum StoreError {
    #[error("This PIN is already taken. Try another.")]
    PinTaken(Pin),

    #[error("Initial balance cannot be negative.")]
    NegativeOpeningBalance(Decimal),
}

type StoreResult<T> = anyhow::Result<T, StoreError>;

/// This keeps every account opened during the process lifetime, keyed by PIN
#[derive(Debug, Default)]
pub struct Store {
    accounts: BTreeMap<Pin, Account>,
}

impl Store {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pin: Pin) -> bool {
        self.accounts.contains_key(&pin)
    }

    pub fn get(&self, pin: Pin) -> Option<&Account> {
        self.accounts.get(&pin)
    }

    pub(crate) fn get_mut(&mut self, pin: Pin) -> Option<&mut Account> {
        self.accounts.get_mut(&pin)
    }

    /// Insert-if-absent. The account is keyed by its own PIN.
    pub(crate) fn insert(&mut self, account: Account) -> StoreResult<()> {
        let pin = account.pin();
        if self.contains(pin) {
            return Err(StoreError::PinTaken(pin));
        }
        self.accounts.insert(pin, account);
        Ok(())
    }

    pub(crate) fn open_account(&mut self, pin: Pin, initial_balance: Decimal) -> StoreResult<()> {
        if self.contains(pin) {
            warn!("PIN {pin} is already in use");
            return Err(StoreError::PinTaken(pin));
        }
        if initial_balance < Decimal::ZERO {
            warn!("refusing to open account {pin} with balance {initial_balance}");
            return Err(StoreError::NegativeOpeningBalance(initial_balance));
        }

        self.insert(Account::new(pin, initial_balance))?;
        info!("opened account {pin} with balance {initial_balance}");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }
}
