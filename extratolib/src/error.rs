//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtratoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Invalid account: {0} must not be empty")]
    InvalidAccount(&'static str),

    #[error("Unknown account type: {0} (expected CHECKING, SAVINGS or CREDITCARD)")]
    UnknownAccountType(String),

    /// В документе не распознано ни одной транзакции.
    #[error("Não foi possível extrair transações do PDF. Verifique se é um extrato bancário válido.")]
    NoTransactions,
}

pub type Result<T> = std::result::Result<T, ExtratoError>;
