use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use crate::domain::entities::{EntryType, LedgerEntry, Wallet};
use crate::domain::error::WalletError;
use crate::domain::repository::WalletRepository;
use crate::domain::types::{UserId, WalletId};
use common::risk_client::{RiskClient, RiskClientError, RiskDecision, RiskEvaluationRequest};

/// Backs both `credit` and `debit` (spec.md §4.2). A debit additionally runs
/// the optional risk coupling described there: "When the wallet-level
/// risk-check flag is enabled, a debit (and only a debit) is preceded by a
/// Risk evaluation call with event_type=`wallet_transaction`."
pub struct ApplyEntryUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
    risk_client: Option<Arc<dyn RiskClient>>,
}

impl ApplyEntryUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>, risk_client: Option<Arc<dyn RiskClient>>) -> Self {
        Self {
            wallet_repo,
            risk_client,
        }
    }

    #[tracing::instrument(skip(self, details))]
    pub async fn execute(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        entry_type: EntryType,
        amount: Decimal,
        idempotency_key: Option<String>,
        details: JsonValue,
    ) -> Result<(Wallet, LedgerEntry, bool), WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidData("amount must be greater than zero".into()));
        }

        if entry_type == EntryType::Debit {
            if let Some(risk_client) = &self.risk_client {
                self.run_risk_check(risk_client.as_ref(), wallet_id, owner_user_id, amount, idempotency_key.as_deref())
                    .await?;
            }
        }

        self.wallet_repo
            .apply_entry(wallet_id, owner_user_id, entry_type, amount, idempotency_key, details)
            .await
    }

    async fn run_risk_check(
        &self,
        risk_client: &dyn RiskClient,
        wallet_id: WalletId,
        owner_user_id: UserId,
        amount: Decimal,
        idempotency_key: Option<&str>,
    ) -> Result<(), WalletError> {
        let wallet = self.wallet_repo.find_wallet(wallet_id, owner_user_id).await?;
        let key = format!("wallet-debit-{}-{}", wallet_id, idempotency_key.unwrap_or("none"));
        let request = RiskEvaluationRequest {
            event_type: "wallet_transaction".to_string(),
            subject_id: wallet_id.to_string(),
            user_id: owner_user_id.to_string(),
            amount,
            currency: wallet.currency().to_string(),
            metadata: Default::default(),
        };

        match risk_client.evaluate(&key, request).await {
            Ok(response) => match response.decision {
                RiskDecision::Approve => Ok(()),
                RiskDecision::Review => Err(WalletError::RiskReview),
                RiskDecision::Decline => Err(WalletError::RiskDeclined),
            },
            Err(RiskClientError::Timeout) => Err(WalletError::RiskTimeout),
            Err(RiskClientError::Unavailable(reason)) | Err(RiskClientError::EvaluationFailed(reason)) => {
                Err(WalletError::RiskUnavailable(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WalletStatus;
    use crate::domain::repository::MockWalletRepository;
    use common::risk_client::FakeRiskClient;
    use mockall::predicate::eq;

    fn wallet(owner_user_id: UserId, balance: Decimal) -> Wallet {
        Wallet::reconstitute(
            WalletId(1),
            owner_user_id,
            "USD".into(),
            WalletStatus::Active,
            balance,
            chrono::Utc::now(),
            chrono::Utc::now(),
        )
        .unwrap()
    }

    fn entry(wallet_id: WalletId, entry_type: EntryType, amount: Decimal) -> LedgerEntry {
        LedgerEntry::reconstitute(
            crate::domain::types::LedgerEntryId(1),
            wallet_id,
            entry_type,
            amount,
            None,
            JsonValue::Null,
            chrono::Utc::now(),
        )
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let use_case = ApplyEntryUseCase::new(Arc::new(MockWalletRepository::new()), None);
        let result = use_case
            .execute(
                WalletId(1),
                UserId(7),
                EntryType::Credit,
                Decimal::ZERO,
                None,
                JsonValue::Null,
            )
            .await;
        assert!(matches!(result, Err(WalletError::InvalidData(_))));
    }

    #[tokio::test]
    async fn credit_skips_risk_check_entirely() {
        let wallet_id = WalletId(1);
        let owner_user_id = UserId(7);
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_find_wallet().times(0);
        mock_repo
            .expect_apply_entry()
            .returning(move |wallet_id, owner, entry_type, amount, _key, _details| {
                Ok((wallet(owner, Decimal::new(10000, 2)), entry(wallet_id, entry_type, amount), false))
            });

        let use_case = ApplyEntryUseCase::new(
            Arc::new(mock_repo),
            Some(Arc::new(FakeRiskClient {
                decision: RiskDecision::Decline,
            })),
        );
        let result = use_case
            .execute(
                wallet_id,
                owner_user_id,
                EntryType::Credit,
                Decimal::new(10000, 2),
                None,
                JsonValue::Null,
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn debit_declined_by_risk_never_reaches_repository() {
        let wallet_id = WalletId(1);
        let owner_user_id = UserId(7);
        let mut mock_repo = MockWalletRepository::new();
        mock_repo
            .expect_find_wallet()
            .with(eq(wallet_id), eq(owner_user_id))
            .returning(move |wallet_id, owner| Ok(wallet(owner, Decimal::new(10000, 2))));
        mock_repo.expect_apply_entry().times(0);

        let use_case = ApplyEntryUseCase::new(
            Arc::new(mock_repo),
            Some(Arc::new(FakeRiskClient {
                decision: RiskDecision::Decline,
            })),
        );
        let result = use_case
            .execute(
                wallet_id,
                owner_user_id,
                EntryType::Debit,
                Decimal::new(4000, 2),
                Some("k1".to_string()),
                JsonValue::Null,
            )
            .await;
        assert!(matches!(result, Err(WalletError::RiskDeclined)));
    }
}
