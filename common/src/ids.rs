//! Newtype identifiers shared across service boundaries.
//!
//! spec.md fixes identifiers as 64-bit integers. `UserId` is the one id that
//! genuinely crosses crate boundaries (it is the token validator's verified
//! subject, consumed by both `wallet_service` and `payments_service`); every
//! other id (`WalletId`, `HoldId`, `TransferId`, `PaymentIntentId`, ...) is
//! owned and defined within the service that issues it, per spec.md §3's
//! "no cross-service foreign keys" rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The authenticated subject of a request, as resolved by the token
/// validator from the JWT `sub` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl UserId {
    /// Parses the JWT `sub` claim, which is a string containing a positive
    /// integer per spec.md §6.
    pub fn from_subject_claim(sub: &str) -> Option<Self> {
        let value: i64 = sub.parse().ok()?;
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }
}
