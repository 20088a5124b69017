//! Maps [`WalletError`] onto the uniform error envelope (spec.md §6/§7).
//! The request id itself isn't threaded in here — `error_response` is given
//! `None` and `common::request_context::request_id_middleware` echoes the
//! already-assigned id onto the outgoing response regardless.

use axum::response::{IntoResponse, Response};
use common::error::error_response;

use crate::domain::error::WalletError;

pub struct ApiError(pub WalletError);

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let code = match &err {
            WalletError::InvalidData(_) => "invalid_request",
            WalletError::NotFound(_) => "wallet_not_found",
            WalletError::HoldNotFound => "hold_not_found",
            WalletError::Forbidden => "forbidden",
            WalletError::InsufficientFunds(_) => "insufficient_funds",
            WalletError::IllegalTransition(_) => "illegal_state_transition",
            WalletError::RiskDeclined => "risk_declined",
            WalletError::RiskReview => "risk_review",
            WalletError::RiskTimeout => "risk_timeout",
            WalletError::RiskUnavailable(_) => "risk_unavailable",
            WalletError::RepositoryError(_) => "internal_error",
        };
        error_response(err.kind(), code, Some(err.to_string()), None)
    }
}
