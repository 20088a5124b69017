use thiserror::Error;

use common::error::ErrorKind;

/// Every failure mode a Risk evaluation can produce. The rule engine itself
/// never fails — only malformed input does.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("invalid evaluation request: {0}")]
    InvalidData(String),

    #[error("evaluation {0} not found")]
    NotFound(uuid::Uuid),
}

impl RiskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RiskError::InvalidData(_) => ErrorKind::Validation,
            RiskError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
