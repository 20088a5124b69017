//! Maps [`RiskError`] onto the uniform error envelope (spec.md §6/§7),
//! mirroring `wallet_service::api::error::ApiError`.

use axum::response::{IntoResponse, Response};
use common::error::error_response;

use crate::domain::error::RiskError;

pub struct ApiError(pub RiskError);

impl From<RiskError> for ApiError {
    fn from(err: RiskError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let code = match &err {
            RiskError::InvalidData(_) => "invalid_request",
            RiskError::NotFound(_) => "evaluation_not_found",
        };
        error_response(err.kind(), code, Some(err.to_string()), None)
    }
}
