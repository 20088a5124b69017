//! Wires [`TokenValidator`] into axum as a request extractor. Each service's
//! `AppState` implements [`ProvidesTokenValidator`] to say which scopes it
//! accepts; the extractor itself is shared.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::Response;
use common::UserId;

use crate::claims::Scope;
use crate::validator::TokenValidator;

pub trait ProvidesTokenValidator {
    fn token_validator(&self) -> &Arc<TokenValidator>;
    fn allowed_scopes(&self) -> &'static [Scope];
}

/// The authenticated principal, extracted from `Authorization: Bearer ...`.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: UserId,
    pub scope: Scope,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: ProvidesTokenValidator + Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        use axum::response::IntoResponse;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let authenticated = state
            .token_validator()
            .validate(header, state.allowed_scopes())
            .await
            .map_err(|err| err.into_response())?;

        Ok(AuthContext {
            user_id: authenticated.user_id,
            scope: authenticated.scope,
        })
    }
}
