use std::io::Write;

use crate::account::Account;
use crate::error::{Error, Result};

/// Owns the bank's accounts, kept in the order they were added.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an account. Fails only if its id is already taken.
    pub fn add(&mut self, account: Account) -> Result<()> {
        if self.find(account.id()).is_some() {
            return Err(Error::DuplicateAccount(account.id()));
        }
        tracing::debug!(id = account.id(), owner = account.owner(), "account added");
        self.accounts.push(account);
        Ok(())
    }

    pub fn find(&self, id: u32) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id() == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn display_all<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "\n===== All Bank Accounts =====")?;
        for account in self.iter() {
            account.display(writer)?;
            writeln!(writer, "--------------------------")?;
        }
        Ok(())
    }
}
