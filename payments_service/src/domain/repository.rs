use async_trait::async_trait;

use crate::domain::entities::{NewPaymentIntent, PaymentIntent};
use crate::domain::error::PaymentError;
use crate::domain::types::{PaymentIntentId, UserId};

/// Port for payment-intent persistence. Unlike `wallet_service`'s
/// `WalletRepository` (which uses `#[cfg_attr(test, mockall::automock)]`),
/// this crate follows the teacher's other flavor — `transaction_service`'s
/// inline `mockall::mock! {}` blocks per test module (spec.md §9a's ambient
/// test-tooling note).
#[async_trait]
pub trait PaymentIntentRepository: Send + Sync {
    async fn create(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, PaymentError>;

    async fn find(&self, id: PaymentIntentId, user_id: UserId) -> Result<PaymentIntent, PaymentError>;

    async fn update(&self, intent: &PaymentIntent) -> Result<PaymentIntent, PaymentError>;
}
