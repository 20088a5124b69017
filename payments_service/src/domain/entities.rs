use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::PaymentError;
use crate::domain::types::{HoldId, PaymentIntentId, UserId, WalletId};

/// spec.md §4.4's state machine. `Review` and `Declined` are reached only
/// via `confirm`; both are terminal (`Review` is "soft-terminal": a further
/// `confirm` is idempotent and returns the record unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentIntentStatus {
    Pending,
    Confirmed,
    Declined,
    Review,
    Canceled,
}

impl PaymentIntentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PaymentIntentStatus::Confirmed | PaymentIntentStatus::Declined | PaymentIntentStatus::Canceled
        )
    }
}

/// A payment intent row. Reached only through [`PaymentIntent::new`]
/// (pre-insert) or [`PaymentIntent::reconstitute`] (post-insert / loaded).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    id: PaymentIntentId,
    user_id: UserId,
    wallet_id: WalletId,
    amount: Decimal,
    currency: String,
    status: PaymentIntentStatus,
    hold_id: Option<HoldId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A payment intent not yet assigned an id — the shape `createIntent` inserts.
pub struct NewPaymentIntent {
    pub user_id: UserId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub currency: String,
}

impl PaymentIntent {
    pub fn new(user_id: UserId, wallet_id: WalletId, amount: Decimal, currency: String) -> Result<NewPaymentIntent, PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidData("amount must be greater than zero".into()));
        }
        let currency = currency.trim().to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentError::InvalidData("currency must be a 3-letter ISO code".into()));
        }
        Ok(NewPaymentIntent {
            user_id,
            wallet_id,
            amount,
            currency,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PaymentIntentId,
        user_id: UserId,
        wallet_id: WalletId,
        amount: Decimal,
        currency: String,
        status: PaymentIntentStatus,
        hold_id: Option<HoldId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            wallet_id,
            amount,
            currency,
            status,
            hold_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> PaymentIntentId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn wallet_id(&self) -> WalletId {
        self.wallet_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn status(&self) -> PaymentIntentStatus {
        self.status
    }

    pub fn hold_id(&self) -> Option<HoldId> {
        self.hold_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_status(&mut self, status: PaymentIntentStatus) {
        self.status = status;
    }

    pub fn set_hold_id(&mut self, hold_id: HoldId) {
        self.hold_id = Some(hold_id);
    }
}
