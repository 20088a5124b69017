use std::sync::Arc;

use common::pagination::{clamp_limit, next_cursor};

use crate::domain::entities::LedgerEntry;
use crate::domain::error::WalletError;
use crate::domain::repository::WalletRepository;
use crate::domain::types::{UserId, WalletId};

/// spec.md §4.2 `listStatement`: entries descending by id, cursor-paginated.
pub struct ListStatementUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl ListStatementUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        limit: Option<i64>,
        cursor: Option<i64>,
    ) -> Result<(Vec<LedgerEntry>, Option<i64>), WalletError> {
        let limit = clamp_limit(limit);
        let (entries, last_id) = self
            .wallet_repo
            .list_statement(wallet_id, owner_user_id, limit, cursor)
            .await?;
        let cursor = next_cursor(last_id, entries.len(), limit);
        Ok((entries, cursor))
    }
}
