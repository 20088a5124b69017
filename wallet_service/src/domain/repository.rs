use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::entities::{EntryType, Hold, LedgerEntry, Transfer, Wallet};
use crate::domain::error::WalletError;
use crate::domain::types::{HoldId, UserId, WalletId};

/// spec.md §4.2 `transfer`'s combined result: the transfer row plus both
/// wallet snapshots, so a replay returns "the same wallet snapshots"
/// without a second round trip.
pub struct TransferOutcome {
    pub transfer: Transfer,
    pub source_wallet: Wallet,
    pub target_wallet: Wallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    Balanced,
    DriftDetected,
}

/// spec.md §4.2 `reconcile`.
pub struct Reconciliation {
    pub wallet_id: WalletId,
    pub stored_balance: Decimal,
    pub ledger_balance: Decimal,
    pub delta: Decimal,
    pub entry_count: i64,
    pub status: ReconciliationStatus,
}

/// Port for wallet persistence. Every mutating method owns its whole
/// transaction — lock acquisition, the idempotency pre-check, and the
/// business-rule check all happen inside the implementation, mirroring how
/// the teacher's `update_balance` combines locking and validation in the
/// infrastructure layer (see `infrastructure/persistence/wallet_repository.rs`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Returns `(wallet, created)`; `created=false` means an existing
    /// (owner, currency) wallet was returned unchanged (spec.md §4.2
    /// `createWallet`).
    async fn create_wallet(
        &self,
        owner_user_id: UserId,
        currency: String,
        allow_additional: bool,
    ) -> Result<(Wallet, bool), WalletError>;

    async fn find_wallet(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Wallet, WalletError>;

    /// Backs both `credit` and `debit`. Returns `(wallet, entry, replayed)`;
    /// `replayed=true` means `idempotency_key` matched an existing entry and
    /// no new state was written.
    #[allow(clippy::too_many_arguments)]
    async fn apply_entry(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        entry_type: EntryType,
        amount: Decimal,
        idempotency_key: Option<String>,
        details: JsonValue,
    ) -> Result<(Wallet, LedgerEntry, bool), WalletError>;

    /// Returns `(hold, replayed)` (spec.md §4.2 `hold.create`).
    #[allow(clippy::too_many_arguments)]
    async fn create_hold(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        amount: Decimal,
        idempotency_key: String,
        reference: Option<String>,
        details: JsonValue,
    ) -> Result<(Hold, bool), WalletError>;

    async fn release_hold(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        hold_id: HoldId,
    ) -> Result<Hold, WalletError>;

    async fn capture_hold(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        hold_id: HoldId,
    ) -> Result<Hold, WalletError>;

    #[allow(clippy::too_many_arguments)]
    async fn transfer(
        &self,
        user_id: UserId,
        source_wallet_id: WalletId,
        target_wallet_id: WalletId,
        amount: Decimal,
        currency: String,
        idempotency_key: String,
        description: Option<String>,
        external_reference: Option<String>,
    ) -> Result<TransferOutcome, WalletError>;

    async fn list_statement(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        limit: i64,
        cursor: Option<i64>,
    ) -> Result<(Vec<LedgerEntry>, Option<i64>), WalletError>;

    async fn reconcile(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Reconciliation, WalletError>;
}
