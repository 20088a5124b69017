use thiserror::Error;

use crate::domain::types::WalletId;
use common::error::ErrorKind;

/// Every failure mode a Wallet Ledger Core operation can produce, mapped to
/// spec.md §7's wire-status table via [`WalletError::kind`].
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("invalid wallet request: {0}")]
    InvalidData(String),

    #[error("wallet {0} not found")]
    NotFound(WalletId),

    #[error("hold not found")]
    HoldNotFound,

    #[error("idempotency key belongs to another user")]
    Forbidden,

    #[error("insufficient funds in wallet {0}")]
    InsufficientFunds(WalletId),

    #[error("illegal state transition: {0}")]
    IllegalTransition(String),

    #[error("risk evaluation declined the operation")]
    RiskDeclined,

    #[error("risk evaluation requires manual review")]
    RiskReview,

    #[error("risk evaluator timed out")]
    RiskTimeout,

    #[error("risk evaluator unavailable: {0}")]
    RiskUnavailable(String),

    #[error("repository error: {0}")]
    RepositoryError(String),
}

impl WalletError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::InvalidData(_) => ErrorKind::Validation,
            WalletError::NotFound(_) | WalletError::HoldNotFound => ErrorKind::NotFound,
            WalletError::Forbidden | WalletError::RiskDeclined => ErrorKind::Forbidden,
            WalletError::InsufficientFunds(_)
            | WalletError::IllegalTransition(_)
            | WalletError::RiskReview => ErrorKind::Conflict,
            WalletError::RiskTimeout => ErrorKind::UpstreamTimeout,
            WalletError::RiskUnavailable(_) => ErrorKind::UpstreamUnavailable,
            WalletError::RepositoryError(_) => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for WalletError {
    fn from(err: sqlx::Error) -> Self {
        WalletError::RepositoryError(err.to_string())
    }
}
