//! Wire shapes for JWT claims and the `scope` closed sum type (spec.md §6,
//! §9's "Decision enums" note: closed sum types serialize as lowercase
//! strings).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Access,
    Refresh,
    WalletAccess,
}

impl Scope {
    fn as_claim_str(self) -> &'static str {
        match self {
            Scope::Access => "access",
            Scope::Refresh => "refresh",
            Scope::WalletAccess => "wallet_access",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "access" => Some(Scope::Access),
            "refresh" => Some(Scope::Refresh),
            "wallet_access" => Some(Scope::WalletAccess),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_claim_str())
    }
}

/// Claims expected on every access token (spec.md §6).
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub sub: String,
    pub scope: String,
    pub typ: String,
    #[serde(default)]
    pub jti: Option<String>,
}
