//! Maps [`PaymentError`] onto the uniform error envelope (spec.md §6/§7),
//! mirroring `wallet_service::api::error::ApiError`.

use axum::response::{IntoResponse, Response};
use common::error::error_response;

use crate::domain::error::PaymentError;

pub struct ApiError(pub PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let code = match &err {
            PaymentError::InvalidData(_) => "invalid_request",
            PaymentError::NotFound(_) => "payment_intent_not_found",
            PaymentError::IllegalTransition(_) => "illegal_state_transition",
            PaymentError::RiskDeclined => "risk_declined",
            PaymentError::RiskTimeout => "risk_timeout",
            PaymentError::RiskUnavailable(_) => "risk_unavailable",
            PaymentError::WalletCallFailed { .. } => "wallet_call_failed",
            PaymentError::RepositoryError(_) => "internal_error",
        };
        error_response(err.kind(), code, Some(err.to_string()), None)
    }
}
