use std::sync::Arc;

use crate::domain::entities::Hold;
use crate::domain::error::WalletError;
use crate::domain::repository::WalletRepository;
use crate::domain::types::{HoldId, UserId, WalletId};

/// spec.md §4.2 `hold.release`: active → released credits the wallet back;
/// already-released is a no-op; captured is a 409 (the repository enforces
/// the one-shot transition and surfaces `IllegalTransition`).
pub struct HoldReleaseUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl HoldReleaseUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        hold_id: HoldId,
    ) -> Result<Hold, WalletError> {
        self.wallet_repo.release_hold(wallet_id, owner_user_id, hold_id).await
    }
}
