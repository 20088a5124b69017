//! `TokenError` mirrors the `.code()`/`.is_unauthorized()` style of
//! `pretyflaco-openagents/apps/runtime/src/sync_auth.rs::SyncAuthError`,
//! adapted to the two wire outcomes spec.md §4.1 allows: `Unauthenticated`
//! (401, no token contents leaked) and `Unavailable` (503, JWKS fetch
//! failure on a cache miss).

use axum::response::{IntoResponse, Response};
use common::error::{error_response, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("missing or malformed Authorization header")]
    MissingAuthorization,
    #[error("token header or signature is invalid")]
    InvalidToken,
    #[error("token has expired")]
    TokenExpired,
    #[error("token is not yet valid")]
    TokenNotYetValid,
    #[error("token scope is not permitted for this operation")]
    ScopeNotPermitted,
    #[error("token subject is not a positive integer")]
    InvalidSubject,
    #[error("JWKS key set unavailable: {0}")]
    JwksUnavailable(String),
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingAuthorization => "missing_authorization",
            TokenError::InvalidToken => "invalid_token",
            TokenError::TokenExpired => "token_expired",
            TokenError::TokenNotYetValid => "token_not_yet_valid",
            TokenError::ScopeNotPermitted => "scope_not_permitted",
            TokenError::InvalidSubject => "invalid_subject",
            TokenError::JwksUnavailable(_) => "jwks_unavailable",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, TokenError::JwksUnavailable(_))
    }
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let kind = if self.is_unauthorized() {
            ErrorKind::Unauthenticated
        } else {
            ErrorKind::Unavailable
        };
        // spec.md §4.1: "No token contents leaked in the error body" — the
        // detail is the stable code, never the underlying parse/signature
        // error text.
        error_response(kind, "authentication_failed", Some(self.code().to_string()), None)
    }
}
