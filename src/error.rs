use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid deposit amount!")]
    InvalidDeposit,
    #[error("Invalid withdrawal amount or insufficient funds!")]
    InvalidWithdrawal,
    #[error("Account not found!")]
    AccountNotFound,
    #[error("Invalid choice!")]
    InvalidChoice,
    #[error("Account (id: {0}) cannot open with a negative balance")]
    NegativeBalance(u32),
    #[error("Account (id: {0}) already exists")]
    DuplicateAccount(u32),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
