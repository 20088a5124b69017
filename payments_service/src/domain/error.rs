use thiserror::Error;

use crate::domain::types::PaymentIntentId;
use common::error::ErrorKind;

/// Every failure mode a Payment Intent Orchestrator operation can produce,
/// mapped to spec.md §7's wire-status table via [`PaymentError::kind`].
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("invalid payment intent request: {0}")]
    InvalidData(String),

    #[error("payment intent {0} not found")]
    NotFound(PaymentIntentId),

    #[error("illegal state transition: {0}")]
    IllegalTransition(String),

    #[error("risk evaluation declined the payment")]
    RiskDeclined,

    #[error("risk evaluator timed out")]
    RiskTimeout,

    #[error("risk evaluator unavailable: {0}")]
    RiskUnavailable(String),

    #[error("wallet {op} failed ({reason})")]
    WalletCallFailed { op: &'static str, reason: String },

    #[error("repository error: {0}")]
    RepositoryError(String),
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::InvalidData(_) => ErrorKind::Validation,
            PaymentError::NotFound(_) => ErrorKind::NotFound,
            PaymentError::RiskDeclined => ErrorKind::Forbidden,
            PaymentError::IllegalTransition(_) | PaymentError::WalletCallFailed { .. } => ErrorKind::Conflict,
            PaymentError::RiskTimeout => ErrorKind::UpstreamTimeout,
            PaymentError::RiskUnavailable(_) => ErrorKind::UpstreamUnavailable,
            PaymentError::RepositoryError(_) => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for PaymentError {
    fn from(err: sqlx::Error) -> Self {
        PaymentError::RepositoryError(err.to_string())
    }
}
