//! SQLx row model for `payment_intents`, converted into the domain entity
//! via `reconstitute` — same split wallet_service's `WalletModel` uses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::domain::entities::{PaymentIntent, PaymentIntentStatus};
use crate::domain::types::{HoldId, PaymentIntentId, UserId, WalletId};

#[derive(Debug, FromRow)]
pub struct PaymentIntentModel {
    pub id: PaymentIntentId,
    pub user_id: UserId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentIntentStatus,
    pub hold_id: Option<HoldId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentIntentModel> for PaymentIntent {
    fn from(m: PaymentIntentModel) -> Self {
        PaymentIntent::reconstitute(
            m.id,
            m.user_id,
            m.wallet_id,
            m.amount,
            m.currency,
            m.status,
            m.hold_id,
            m.created_at,
            m.updated_at,
        )
    }
}
