use std::sync::Arc;

use crate::domain::entities::{PaymentIntent, PaymentIntentStatus};
use crate::domain::error::PaymentError;
use crate::domain::gateways::WalletGateway;
use crate::domain::repository::PaymentIntentRepository;
use crate::domain::types::{PaymentIntentId, UserId};

/// spec.md §4.4 cancel algorithm: valid only from `{pending, review}`;
/// releases the hold if one was taken; idempotent once already canceled.
pub struct CancelIntentUseCase {
    repo: Arc<dyn PaymentIntentRepository>,
    wallet_gateway: Arc<dyn WalletGateway>,
}

impl CancelIntentUseCase {
    pub fn new(repo: Arc<dyn PaymentIntentRepository>, wallet_gateway: Arc<dyn WalletGateway>) -> Self {
        Self { repo, wallet_gateway }
    }

    #[tracing::instrument(skip(self, authorization))]
    pub async fn execute(
        &self,
        id: PaymentIntentId,
        user_id: UserId,
        authorization: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut intent = self.repo.find(id, user_id).await?;

        if intent.status() == PaymentIntentStatus::Canceled {
            return Ok(intent);
        }
        if !matches!(intent.status(), PaymentIntentStatus::Pending | PaymentIntentStatus::Review) {
            return Err(PaymentError::IllegalTransition(format!(
                "cannot cancel a payment intent in status {:?}",
                intent.status()
            )));
        }

        if let Some(hold_id) = intent.hold_id() {
            let idempotency_key = format!("pi-hold-release-{id}");
            self.wallet_gateway
                .release_hold(intent.wallet_id(), hold_id, idempotency_key, authorization)
                .await?;
        }

        intent.set_status(PaymentIntentStatus::Canceled);
        self.repo.update(&intent).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use rust_decimal::Decimal;

    use crate::domain::entities::PaymentIntent as Entity;
    use crate::domain::gateways::RemoteHold;
    use crate::domain::types::{HoldId, WalletId};

    mock! {
        pub PaymentIntentRepositoryImpl {}

        #[async_trait]
        impl PaymentIntentRepository for PaymentIntentRepositoryImpl {
            async fn create(&self, intent: crate::domain::entities::NewPaymentIntent) -> Result<PaymentIntent, PaymentError>;
            async fn find(&self, id: PaymentIntentId, user_id: UserId) -> Result<PaymentIntent, PaymentError>;
            async fn update(&self, intent: &PaymentIntent) -> Result<PaymentIntent, PaymentError>;
        }
    }

    mock! {
        pub WalletGatewayImpl {}

        #[async_trait]
        impl WalletGateway for WalletGatewayImpl {
            async fn create_hold(&self, wallet_id: WalletId, amount: Decimal, idempotency_key: String, authorization: &str) -> Result<RemoteHold, PaymentError>;
            async fn capture_hold(&self, wallet_id: WalletId, hold_id: HoldId, idempotency_key: String, authorization: &str) -> Result<RemoteHold, PaymentError>;
            async fn release_hold(&self, wallet_id: WalletId, hold_id: HoldId, idempotency_key: String, authorization: &str) -> Result<RemoteHold, PaymentError>;
        }
    }

    fn intent(status: PaymentIntentStatus, hold_id: Option<HoldId>) -> Entity {
        Entity::reconstitute(
            PaymentIntentId(1),
            UserId(7),
            WalletId(42),
            Decimal::new(10000, 2),
            "USD".to_string(),
            status,
            hold_id,
            Utc::now(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn cancel_without_hold_just_marks_canceled() {
        let mut repo = MockPaymentIntentRepositoryImpl::new();
        let gateway = MockWalletGatewayImpl::new();

        repo.expect_find()
            .times(1)
            .returning(|_, _| Ok(intent(PaymentIntentStatus::Pending, None)));
        repo.expect_update().times(1).returning(|i| Ok(i.clone()));

        let use_case = CancelIntentUseCase::new(Arc::new(repo), Arc::new(gateway));
        let result = use_case
            .execute(PaymentIntentId(1), UserId(7), "Bearer token")
            .await
            .unwrap();
        assert_eq!(result.status(), PaymentIntentStatus::Canceled);
    }

    #[tokio::test]
    async fn cancel_with_hold_releases_it_first() {
        let mut repo = MockPaymentIntentRepositoryImpl::new();
        let mut gateway = MockWalletGatewayImpl::new();

        repo.expect_find()
            .times(1)
            .returning(|_, _| Ok(intent(PaymentIntentStatus::Review, Some(HoldId(55)))));
        gateway.expect_release_hold().times(1).returning(|_, _, _, _| {
            Ok(RemoteHold {
                id: HoldId(55),
                status: crate::domain::gateways::RemoteHoldStatus::Released,
            })
        });
        repo.expect_update().times(1).returning(|i| Ok(i.clone()));

        let use_case = CancelIntentUseCase::new(Arc::new(repo), Arc::new(gateway));
        let result = use_case
            .execute(PaymentIntentId(1), UserId(7), "Bearer token")
            .await
            .unwrap();
        assert_eq!(result.status(), PaymentIntentStatus::Canceled);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_once_canceled() {
        let mut repo = MockPaymentIntentRepositoryImpl::new();
        let gateway = MockWalletGatewayImpl::new();

        repo.expect_find()
            .times(1)
            .returning(|_, _| Ok(intent(PaymentIntentStatus::Canceled, None)));

        let use_case = CancelIntentUseCase::new(Arc::new(repo), Arc::new(gateway));
        let result = use_case
            .execute(PaymentIntentId(1), UserId(7), "Bearer token")
            .await
            .unwrap();
        assert_eq!(result.status(), PaymentIntentStatus::Canceled);
    }

    #[tokio::test]
    async fn cancel_rejects_confirmed_intent() {
        let mut repo = MockPaymentIntentRepositoryImpl::new();
        let gateway = MockWalletGatewayImpl::new();

        repo.expect_find()
            .times(1)
            .returning(|_, _| Ok(intent(PaymentIntentStatus::Confirmed, Some(HoldId(55)))));

        let use_case = CancelIntentUseCase::new(Arc::new(repo), Arc::new(gateway));
        let result = use_case.execute(PaymentIntentId(1), UserId(7), "Bearer token").await;
        assert!(matches!(result, Err(PaymentError::IllegalTransition(_))));
    }
}
