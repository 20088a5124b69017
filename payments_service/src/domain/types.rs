//! Newtype identifiers for this service's own tables, following the same
//! NewType pattern `wallet_service::domain::types` uses. `WalletId`/`HoldId`
//! here are the *remote* ids the Wallet Ledger Core assigned — this crate
//! never joins against them, only carries them opaquely (spec.md §3's "no
//! cross-service foreign keys" rule).

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
        )]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PaymentIntentId);
id_newtype!(WalletId);
id_newtype!(HoldId);

pub use common::UserId;
