use std::sync::Arc;

use crate::domain::entities::Wallet;
use crate::domain::error::WalletError;
use crate::domain::repository::WalletRepository;
use crate::domain::types::{UserId, WalletId};

/// spec.md §4.2 `getBalance`.
#[derive(Clone)]
pub struct GetBalanceUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl GetBalanceUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Wallet, WalletError> {
        self.wallet_repo.find_wallet(wallet_id, owner_user_id).await
    }
}
