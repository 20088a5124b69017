use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use crate::domain::entities::Hold;
use crate::domain::error::WalletError;
use crate::domain::repository::WalletRepository;
use crate::domain::types::{UserId, WalletId};

/// spec.md §4.2 `hold.create`: debits the wallet immediately and opens an
/// active hold. Returns `(hold, replayed)`.
pub struct HoldCreateUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl HoldCreateUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(skip(self, details))]
    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        amount: Decimal,
        idempotency_key: String,
        reference: Option<String>,
        details: JsonValue,
    ) -> Result<(Hold, bool), WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidData("amount must be greater than zero".into()));
        }
        if idempotency_key.trim().is_empty() {
            return Err(WalletError::InvalidData("idempotency_key is required".into()));
        }

        self.wallet_repo
            .create_hold(wallet_id, owner_user_id, amount, idempotency_key, reference, details)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_missing_idempotency_key() {
        let use_case = HoldCreateUseCase::new(Arc::new(crate::domain::repository::MockWalletRepository::new()));
        let result = use_case
            .execute(
                WalletId(1),
                UserId(7),
                Decimal::new(1000, 2),
                String::new(),
                None,
                JsonValue::Null,
            )
            .await;
        assert!(matches!(result, Err(WalletError::InvalidData(_))));
    }
}
