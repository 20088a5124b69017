use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::error::WalletError;
use crate::domain::repository::{TransferOutcome, WalletRepository};
use crate::domain::types::{UserId, WalletId};

/// spec.md §4.2 `transfer`: atomic debit(source)+credit(target), with the
/// repository responsible for ascending-id lock ordering and outbox writes.
pub struct TransferUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl TransferUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(skip(self))]
    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        user_id: UserId,
        source_wallet_id: WalletId,
        target_wallet_id: WalletId,
        amount: Decimal,
        currency: String,
        idempotency_key: String,
        description: Option<String>,
        external_reference: Option<String>,
    ) -> Result<TransferOutcome, WalletError> {
        if source_wallet_id == target_wallet_id {
            return Err(WalletError::InvalidData(
                "source and target wallets must differ".into(),
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidData("amount must be greater than zero".into()));
        }
        if idempotency_key.trim().is_empty() {
            return Err(WalletError::InvalidData("idempotency_key is required".into()));
        }

        self.wallet_repo
            .transfer(
                user_id,
                source_wallet_id,
                target_wallet_id,
                amount,
                currency,
                idempotency_key,
                description,
                external_reference,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockWalletRepository;

    #[tokio::test]
    async fn rejects_transfer_to_self() {
        let use_case = TransferUseCase::new(Arc::new(MockWalletRepository::new()));
        let result = use_case
            .execute(
                UserId(7),
                WalletId(1),
                WalletId(1),
                Decimal::new(1000, 2),
                "USD".into(),
                "t1".into(),
                None,
                None,
            )
            .await;
        assert!(matches!(result, Err(WalletError::InvalidData(_))));
    }
}
