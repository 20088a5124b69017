use std::sync::Arc;

use crate::domain::entities::Wallet;
use crate::domain::error::WalletError;
use crate::domain::repository::WalletRepository;
use crate::domain::types::UserId;

/// spec.md §4.2 `createWallet`: returns the existing wallet unchanged if
/// (owner, currency) already has one and `allow_additional` wasn't
/// requested; creates otherwise. The caller distinguishes 200 vs 201 off
/// the returned `created` flag.
pub struct CreateWalletUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl CreateWalletUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        owner_user_id: UserId,
        currency: String,
        allow_additional: bool,
    ) -> Result<(Wallet, bool), WalletError> {
        self.wallet_repo
            .create_wallet(owner_user_id, currency, allow_additional)
            .await
    }
}
