use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{PaymentIntent, PaymentIntentStatus};
use crate::domain::types::{HoldId, PaymentIntentId, UserId, WalletId};

#[derive(Debug, Serialize)]
pub struct PaymentIntentView {
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

impl From<&PaymentIntent> for PaymentIntentView {
    fn from(intent: &PaymentIntent) -> Self {
        Self {
            id: intent.id(),
            user_id: intent.user_id(),
            wallet_id: intent.wallet_id(),
            amount: intent.amount(),
            currency: intent.currency().to_string(),
            status: intent.status(),
            hold_id: intent.hold_id(),
            created_at: intent.created_at(),
            updated_at: intent.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub currency: String,
}
