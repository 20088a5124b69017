//! The uniform error envelope described in spec.md §6/§7.
//!
//! Grounded on `original_source/libs/shared/src/shared/errors.py`'s
//! `error_response`/exception-handler pair and on the teacher's
//! `wallet_service::api::error::ApiError` (status-mapping `IntoResponse`
//! impl). Each service defines its own domain error enum and its own
//! `ApiError` wrapper; this module only supplies the shared wire shape and
//! the kind→status mapping from spec.md §7's table.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// One row of spec.md §7's error table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    Unavailable,
    Forbidden,
    NotFound,
    Conflict,
    UpstreamTimeout,
    UpstreamUnavailable,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The wire body: `{error, detail, request_id}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: Option<String>,
    pub request_id: Option<String>,
}

/// Builds the full response: status line from `kind`, JSON body, and the
/// `x-request-id` header echoed back (spec.md §6).
pub fn error_response(
    kind: ErrorKind,
    error: impl Into<String>,
    detail: Option<String>,
    request_id: Option<String>,
) -> Response {
    let body = ErrorBody {
        error: error.into(),
        detail,
        request_id: request_id.clone(),
    };
    let mut response = (kind.status(), Json(body)).into_response();
    if let Some(id) = request_id {
        if let Ok(value) = axum::http::HeaderValue::from_str(&id) {
            response.headers_mut().insert("x-request-id", value);
        }
    }
    response
}
