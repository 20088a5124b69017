use std::sync::Arc;

use crate::domain::entities::Hold;
use crate::domain::error::WalletError;
use crate::domain::repository::WalletRepository;
use crate::domain::types::{HoldId, UserId, WalletId};

/// spec.md §4.2 `hold.capture`: active → captured leaves funds withdrawn;
/// already-captured is a no-op; released is a 409.
pub struct HoldCaptureUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl HoldCaptureUseCase {
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
        self.wallet_repo.capture_hold(wallet_id, owner_user_id, hold_id).await
    }
}
