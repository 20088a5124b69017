//! Ties the bearer-token parse, JWKS lookup, and claim verification into
//! the single `validate` contract spec.md §4.1 describes.
//!
//! Structurally grounded on `pretyflaco-openagents/apps/runtime/src/sync_auth.rs`'s
//! `SyncAuthorizer` (bearer-extraction helper, `Validation` built once at
//! construction, decode-then-map-error flow) with the signing side swapped
//! from a static HS256 secret + fallback list to an RS256 JWKS lookup, per
//! spec.md §9's "RS256/JWKS is authoritative" note.

use std::time::Duration;

use common::UserId;
use jsonwebtoken::{decode, errors::ErrorKind as JwtErrorKind, Algorithm, Validation};

use crate::claims::{Claims, Scope};
use crate::error::TokenError;
use crate::jwks::JwksCache;

pub struct ValidatorConfig {
    pub jwks_url: String,
    pub issuer: String,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwks_fetch_timeout: Duration,
}

pub struct TokenValidator {
    jwks: JwksCache,
    validation: Validation,
}

/// Extracted from a header value of the form `Bearer <token>`.
fn extract_bearer_token(header_value: Option<&str>) -> Result<&str, TokenError> {
    let value = header_value.ok_or(TokenError::MissingAuthorization)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(TokenError::MissingAuthorization)?
        .trim();
    if token.is_empty() {
        return Err(TokenError::MissingAuthorization);
    }
    Ok(token)
}

fn map_decode_error(kind: &JwtErrorKind) -> TokenError {
    match kind {
        JwtErrorKind::ExpiredSignature => TokenError::TokenExpired,
        JwtErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        _ => TokenError::InvalidToken,
    }
}

/// The authenticated result of a successful `validate` call.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedSubject {
    pub user_id: UserId,
    pub scope: Scope,
}

impl TokenValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[config.issuer.clone()]);
        validation.set_audience(&[config.audience.clone()]);
        validation.validate_nbf = true;

        Self {
            jwks: JwksCache::new(config.jwks_url, config.jwks_cache_ttl, config.jwks_fetch_timeout),
            validation,
        }
    }

    /// spec.md §4.1's `validate(bearer) -> {user_id, scope}` contract.
    /// `allowed_scopes` lets each service accept a different scope set
    /// (Wallet: `{access, wallet_access}`; Payments: `{access}`).
    pub async fn validate(
        &self,
        authorization_header: Option<&str>,
        allowed_scopes: &[Scope],
    ) -> Result<AuthenticatedSubject, TokenError> {
        let token = extract_bearer_token(authorization_header)?;

        let header = jsonwebtoken::decode_header(token).map_err(|_| TokenError::InvalidToken)?;
        let kid = header.kid.ok_or(TokenError::InvalidToken)?;
        let decoding_key = self.jwks.get_key(&kid).await?;

        let data = decode::<Claims>(token, &decoding_key, &self.validation)
            .map_err(|err| map_decode_error(err.kind()))?;
        let claims = data.claims;

        let scope = Scope::parse(&claims.scope).ok_or(TokenError::ScopeNotPermitted)?;
        if !allowed_scopes.contains(&scope) {
            return Err(TokenError::ScopeNotPermitted);
        }

        let user_id = UserId::from_subject_claim(&claims.sub).ok_or(TokenError::InvalidSubject)?;

        Ok(AuthenticatedSubject { user_id, scope })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_authorization_header() {
        assert!(matches!(
            extract_bearer_token(None),
            Err(TokenError::MissingAuthorization)
        ));
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        assert!(matches!(
            extract_bearer_token(Some("Basic abc123")),
            Err(TokenError::MissingAuthorization)
        ));
    }

    #[test]
    fn rejects_empty_bearer_token() {
        assert!(matches!(
            extract_bearer_token(Some("Bearer    ")),
            Err(TokenError::MissingAuthorization)
        ));
    }

    #[test]
    fn extracts_trimmed_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn maps_expired_signature_to_token_expired() {
        assert!(matches!(
            map_decode_error(&JwtErrorKind::ExpiredSignature),
            TokenError::TokenExpired
        ));
    }

    #[test]
    fn maps_immature_signature_to_not_yet_valid() {
        assert!(matches!(
            map_decode_error(&JwtErrorKind::ImmatureSignature),
            TokenError::TokenNotYetValid
        ));
    }

    #[test]
    fn maps_other_errors_to_invalid_token() {
        assert!(matches!(
            map_decode_error(&JwtErrorKind::InvalidSignature),
            TokenError::InvalidToken
        ));
    }
}
