use std::sync::Arc;

use crate::domain::entities::PaymentIntent;
use crate::domain::error::PaymentError;
use crate::domain::repository::PaymentIntentRepository;
use crate::domain::types::{PaymentIntentId, UserId};

/// spec.md §6 `GET /intents/{id}`.
pub struct GetIntentUseCase {
    repo: Arc<dyn PaymentIntentRepository>,
}

impl GetIntentUseCase {
    pub fn new(repo: Arc<dyn PaymentIntentRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: PaymentIntentId, user_id: UserId) -> Result<PaymentIntent, PaymentError> {
        self.repo.find(id, user_id).await
    }
}
