//! Newtype identifiers for this service's own tables (NewType Pattern, as
//! the teacher's `domain/types.rs` does for its UUID ids — here over `i64`
//! per spec.md §3's "identifiers are 64-bit integers" rule).

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

id_newtype!(WalletId);
id_newtype!(LedgerEntryId);
id_newtype!(HoldId);
id_newtype!(TransferId);
id_newtype!(OutboxEventId);

pub use common::UserId;
