use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::ledger::Ledger;

const MENU: &str = "\nBank System Menu:\n\
    1. Deposit\n\
    2. Withdraw\n\
    3. Display All Accounts\n\
    4. Exit\n\
    Choose an option: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Deposit,
    Withdraw,
    DisplayAll,
    Exit,
}

impl FromStr for Choice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<i64>() {
            Ok(1) => Ok(Choice::Deposit),
            Ok(2) => Ok(Choice::Withdraw),
            Ok(3) => Ok(Choice::DisplayAll),
            Ok(4) => Ok(Choice::Exit),
            _ => Err(Error::InvalidChoice),
        }
    }
}

/// Splits the input into whitespace separated answers, so that several
/// answers may be typed on a single line.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Returns `None` once the input is exhausted. Bytes that are not UTF-8
    /// are replaced, so they surface as unrecognized answers.
    fn next(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_owned),
            );
        }
        Ok(self.pending.pop_front())
    }
}

/// Interactive terminal session over a ledger.
pub struct Menu<'a, R, W> {
    ledger: &'a mut Ledger,
    input: Tokens<R>,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(ledger: &'a mut Ledger, input: R, output: W) -> Self {
        Self {
            ledger,
            input: Tokens::new(input),
            output,
        }
    }

    /// Run the menu loop until the user exits or the input ends.
    ///
    /// Rejected input is reported to the user and never ends the loop; only
    /// I/O failures are returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompt(MENU)?;
            let Some(token) = self.input.next()? else {
                tracing::info!("input closed");
                return Ok(());
            };
            let res = match token.parse::<Choice>() {
                Ok(Choice::Deposit) => self.deposit(),
                Ok(Choice::Withdraw) => self.withdraw(),
                Ok(Choice::DisplayAll) => {
                    self.ledger.display_all(&mut self.output)?;
                    Ok(Some(()))
                }
                Ok(Choice::Exit) => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                Err(err) => Err(err),
            };
            match res {
                Ok(Some(())) => {}
                Ok(None) => {
                    tracing::info!("input closed");
                    return Ok(());
                }
                Err(err @ Error::Io(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(%err, "rejected input");
                    writeln!(self.output, "{}", err)?;
                }
            }
        }
    }

    fn deposit(&mut self) -> Result<Option<()>> {
        let Some(id) = self.read_account()? else {
            return Ok(None);
        };
        self.prompt("Enter amount to deposit: ")?;
        let Some(amount) = self.input.next()? else {
            return Ok(None);
        };
        let account = self.ledger.find_mut(id).ok_or(Error::AccountNotFound)?;
        let amount = amount.parse::<Decimal>().map_err(|_| Error::InvalidDeposit)?;
        account.deposit(amount)?;
        writeln!(self.output, "Deposited ${} successfully.", amount.normalize())?;
        Ok(Some(()))
    }

    fn withdraw(&mut self) -> Result<Option<()>> {
        let Some(id) = self.read_account()? else {
            return Ok(None);
        };
        self.prompt("Enter amount to withdraw: ")?;
        let Some(amount) = self.input.next()? else {
            return Ok(None);
        };
        let account = self.ledger.find_mut(id).ok_or(Error::AccountNotFound)?;
        let amount = amount
            .parse::<Decimal>()
            .map_err(|_| Error::InvalidWithdrawal)?;
        account.withdraw(amount)?;
        writeln!(self.output, "Withdrawn ${} successfully.", amount.normalize())?;
        Ok(Some(()))
    }

    /// Ask for an account number and make sure the ledger holds it.
    fn read_account(&mut self) -> Result<Option<u32>> {
        self.prompt("Enter account number: ")?;
        let Some(token) = self.input.next()? else {
            return Ok(None);
        };
        match token.parse::<u32>() {
            Ok(id) if self.ledger.find(id).is_some() => Ok(Some(id)),
            Ok(_) => Err(Error::AccountNotFound),
            // Not a number, so it cannot name any account
            Err(_) => Err(Error::AccountNotFound),
        }
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add(Account::new("Alice", 1001, Decimal::new(500, 0)).unwrap())
            .unwrap();
        ledger
            .add(Account::new("Bob", 1002, Decimal::new(1000, 0)).unwrap())
            .unwrap();
        ledger
    }

    fn session(ledger: &mut Ledger, input: &str) -> String {
        session_bytes(ledger, input.as_bytes())
    }

    fn session_bytes(ledger: &mut Ledger, input: &[u8]) -> String {
        let mut buf = Vec::new();
        Menu::new(ledger, input, &mut buf)
            .run()
            .expect("Session completes");
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_worked_example() {
        let mut ledger = sample();
        let out = session(
            &mut ledger,
            "1\n1001\n200.0\n2\n1001\n150.0\n2\n1001\n10000.0\n4\n",
        );

        assert!(out.contains("Deposited $200 successfully."));
        assert!(out.contains("Withdrawn $150 successfully."));
        assert!(out.contains("Invalid withdrawal amount or insufficient funds!"));
        assert!(out.ends_with("Exiting...\n"));
        assert_eq!(ledger.find(1001).unwrap().balance(), Decimal::new(550, 0));
    }

    #[test]
    fn test_answers_on_one_line() {
        let mut ledger = sample();
        session(&mut ledger, "2 1002 0.50 4");
        assert_eq!(ledger.find(1002).unwrap().balance(), Decimal::new(99950, 2));
    }

    #[test]
    fn test_unknown_account() {
        let mut ledger = sample();
        let out = session(&mut ledger, "1\n9999\n2\nabc\n4\n");

        assert_eq!(out.matches("Account not found!").count(), 2);
        // The amount is not asked for an unknown account
        assert!(!out.contains("Enter amount"));
    }

    #[test]
    fn test_invalid_amounts() {
        let mut ledger = sample();
        let out = session(&mut ledger, "1 1001 -5\n1 1001 abc\n2 1002 0\n4\n");

        assert_eq!(out.matches("Invalid deposit amount!").count(), 2);
        assert!(out.contains("Invalid withdrawal amount or insufficient funds!"));
        assert_eq!(ledger.find(1001).unwrap().balance(), Decimal::new(500, 0));
        assert_eq!(ledger.find(1002).unwrap().balance(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_invalid_choice() {
        let mut ledger = sample();
        let out = session(&mut ledger, "7\nx\n0\n4\n");
        assert_eq!(out.matches("Invalid choice!").count(), 3);
        assert_eq!(out.matches("Choose an option: ").count(), 4);
    }

    #[test]
    fn test_display_all_accounts() {
        let mut ledger = sample();
        let out = session(&mut ledger, "3\n4\n");
        assert!(out.contains("===== All Bank Accounts ====="));
        assert!(out.contains("Account Holder: Alice\nAccount Number: 1001\nBalance: $500.00\n"));
        assert!(out.contains("Account Holder: Bob\nAccount Number: 1002\nBalance: $1000.00\n"));
    }

    #[test]
    fn test_end_of_input_stops_the_loop() {
        let mut ledger = sample();
        let out = session(&mut ledger, "1\n1001\n");
        assert!(out.ends_with("Enter amount to deposit: "));
        assert!(!out.contains("Exiting..."));
        assert_eq!(ledger.find(1001).unwrap().balance(), Decimal::new(500, 0));

        assert!(session(&mut ledger, "").ends_with("Choose an option: "));
    }

    #[test]
    fn test_non_utf8_input_is_rejected_locally() {
        let mut ledger = sample();
        let out = session_bytes(&mut ledger, b"\xff\xfe\n1 \xff\n2 1001 \xc3\n3\n4\n");

        assert!(out.contains("Invalid choice!"));
        assert!(out.contains("Account not found!"));
        assert!(out.contains("Invalid withdrawal amount or insufficient funds!"));
        assert!(out.contains("===== All Bank Accounts ====="));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_deposit_overflow_keeps_the_session_going() {
        let mut ledger = sample();
        let out = session(&mut ledger, "1 1001 79228162514264337593543950335\n3\n4\n");

        assert!(out.contains("Invalid deposit amount!"));
        assert!(out.contains("Balance: $500.00"));
        assert!(out.ends_with("Exiting...\n"));
        assert_eq!(ledger.find(1001).unwrap().balance(), Decimal::new(500, 0));
    }

    #[test]
    fn test_sub_cent_deposit_is_rounded_on_display() {
        let mut ledger = sample();
        let out = session(&mut ledger, "1 1001 0.009\n3\n4\n");

        assert!(out.contains("Deposited $0.009 successfully."));
        assert!(out.contains("Account Holder: Alice\nAccount Number: 1001\nBalance: $500.01\n"));
    }
}
