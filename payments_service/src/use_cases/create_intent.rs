use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::PaymentIntent;
use crate::domain::error::PaymentError;
use crate::domain::repository::PaymentIntentRepository;
use crate::domain::types::{UserId, WalletId};

/// spec.md §4.4 / §6 `POST /intents`: validates and persists a new intent
/// in `pending`.
pub struct CreateIntentUseCase {
    repo: Arc<dyn PaymentIntentRepository>,
}

impl CreateIntentUseCase {
    pub fn new(repo: Arc<dyn PaymentIntentRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
        wallet_id: WalletId,
        amount: Decimal,
        currency: String,
    ) -> Result<PaymentIntent, PaymentError> {
        let new_intent = PaymentIntent::new(user_id, wallet_id, amount, currency)?;
        self.repo.create(new_intent).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use rust_decimal::Decimal;

    use crate::domain::entities::{NewPaymentIntent, PaymentIntent as Entity, PaymentIntentStatus};
    use crate::domain::types::PaymentIntentId;

    mock! {
        pub PaymentIntentRepositoryImpl {}

        #[async_trait]
        impl PaymentIntentRepository for PaymentIntentRepositoryImpl {
            async fn create(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, PaymentError>;
            async fn find(&self, id: PaymentIntentId, user_id: UserId) -> Result<PaymentIntent, PaymentError>;
            async fn update(&self, intent: &PaymentIntent) -> Result<PaymentIntent, PaymentError>;
        }
    }

    #[tokio::test]
    async fn creates_a_pending_intent() {
        let mut repo = MockPaymentIntentRepositoryImpl::new();
        repo.expect_create().times(1).returning(|new_intent| {
            Ok(Entity::reconstitute(
                PaymentIntentId(1),
                new_intent.user_id,
                new_intent.wallet_id,
                new_intent.amount,
                new_intent.currency,
                PaymentIntentStatus::Pending,
                None,
                Utc::now(),
                Utc::now(),
            ))
        });

        let use_case = CreateIntentUseCase::new(Arc::new(repo));
        let result = use_case
            .execute(UserId(7), WalletId(42), Decimal::new(10000, 2), "USD".to_string())
            .await
            .unwrap();
        assert_eq!(result.status(), PaymentIntentStatus::Pending);
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let repo = MockPaymentIntentRepositoryImpl::new();
        let use_case = CreateIntentUseCase::new(Arc::new(repo));
        let result = use_case
            .execute(UserId(7), WalletId(42), Decimal::ZERO, "USD".to_string())
            .await;
        assert!(matches!(result, Err(PaymentError::InvalidData(_))));
    }
}
