use std::sync::Arc;

use crate::domain::error::WalletError;
use crate::domain::repository::{Reconciliation, WalletRepository};
use crate::domain::types::{UserId, WalletId};

/// spec.md §4.2 `reconcile` / §8 invariant 1.
pub struct ReconcileUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl ReconcileUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Reconciliation, WalletError> {
        self.wallet_repo.reconcile(wallet_id, owner_user_id).await
    }
}
