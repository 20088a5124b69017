//! `PostgresPaymentIntentRepository`. Grounded on
//! `transaction_service::infrastructure::persistence::transaction_repository`'s
//! raw-query style, switched from UUID ids to this crate's i64 newtypes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::{NewPaymentIntent, PaymentIntent};
use crate::domain::error::PaymentError;
use crate::domain::repository::PaymentIntentRepository;
use crate::domain::types::{PaymentIntentId, UserId};
use crate::infrastructure::persistence::models::PaymentIntentModel;

const SELECT_COLUMNS: &str =
    "id, user_id, wallet_id, amount, currency, status, hold_id, created_at, updated_at";

pub struct PostgresPaymentIntentRepository {
    pool: PgPool,
}

impl PostgresPaymentIntentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentIntentRepository for PostgresPaymentIntentRepository {
    async fn create(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, PaymentError> {
        let query = format!(
            "INSERT INTO payment_intents (user_id, wallet_id, amount, currency, status, hold_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, 'pending', NULL, now(), now())
             RETURNING {SELECT_COLUMNS}"
        );
        let model = sqlx::query_as::<_, PaymentIntentModel>(&query)
            .bind(intent.user_id)
            .bind(intent.wallet_id)
            .bind(intent.amount)
            .bind(intent.currency)
            .fetch_one(&self.pool)
            .await?;
        Ok(model.into())
    }

    async fn find(&self, id: PaymentIntentId, user_id: UserId) -> Result<PaymentIntent, PaymentError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM payment_intents WHERE id = $1 AND user_id = $2");
        let model = sqlx::query_as::<_, PaymentIntentModel>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        Ok(model.into())
    }

    async fn update(&self, intent: &PaymentIntent) -> Result<PaymentIntent, PaymentError> {
        let query = format!(
            "UPDATE payment_intents
             SET status = $1, hold_id = $2, updated_at = now()
             WHERE id = $3 AND user_id = $4
             RETURNING {SELECT_COLUMNS}"
        );
        let model = sqlx::query_as::<_, PaymentIntentModel>(&query)
            .bind(intent.status())
            .bind(intent.hold_id())
            .bind(intent.id())
            .bind(intent.user_id())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PaymentError::NotFound(intent.id()))?;
        Ok(model.into())
    }
}
