use ikigai_core::ValidationError;
use thiserror::Error;

/// Failures of the journal use cases (trades, accounts, portfolios)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Trade not found: {0}")]
    TradeNotFound(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
}
