use std::io::Write;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    owner: String,
    id: u32,
    balance: Decimal,
}

impl Account {
    /// Open an account. The opening balance must not be negative.
    pub fn new(owner: impl Into<String>, id: u32, initial_balance: Decimal) -> Result<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(Error::NegativeBalance(id));
        }
        Ok(Self {
            owner: owner.into(),
            id,
            balance: initial_balance,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Credit the account. Non-positive amounts are rejected and leave the balance as is.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidDeposit);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidDeposit)?;
        tracing::debug!(id = self.id, %amount, balance = %self.balance, "deposit");
        Ok(())
    }

    /// Debit the account. The amount must be positive and covered by the balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO || amount > self.balance {
            return Err(Error::InvalidWithdrawal);
        }
        self.balance -= amount;
        tracing::debug!(id = self.id, %amount, balance = %self.balance, "withdrawal");
        Ok(())
    }

    pub fn display<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "Account Holder: {}", self.owner)?;
        writeln!(writer, "Account Number: {}", self.id)?;
        let balance = self
            .balance
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        writeln!(writer, "Balance: ${:.2}", balance)
    }
}
