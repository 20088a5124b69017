//! Wire DTOs for the Wallet HTTP surface (spec.md §6). Kept separate from
//! the domain entities so persistence concerns never leak onto the wire,
//! matching the teacher's `ApiResponse<T>` envelope split.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::entities::{
    Hold, HoldStatus, LedgerEntry, Transfer, TransferStatus, Wallet, WalletStatus,
};
use crate::domain::repository::{Reconciliation, ReconciliationStatus, TransferOutcome};
use crate::domain::types::{HoldId, LedgerEntryId, TransferId, UserId, WalletId};

#[derive(Debug, Serialize)]
pub struct WalletView {
    pub id: WalletId,
    pub owner_user_id: UserId,
    pub currency: String,
    pub status: WalletStatus,
    pub balance: Decimal,
}

impl From<&Wallet> for WalletView {
    fn from(wallet: &Wallet) -> Self {
        Self {
            id: wallet.id(),
            owner_user_id: wallet.owner_user_id(),
            currency: wallet.currency().to_string(),
            status: wallet.status(),
            balance: wallet.balance(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BalanceView {
    pub id: WalletId,
    pub currency: String,
    pub balance: Decimal,
}

impl From<&Wallet> for BalanceView {
    fn from(wallet: &Wallet) -> Self {
        Self {
            id: wallet.id(),
            currency: wallet.currency().to_string(),
            balance: wallet.balance(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerEntryView {
    pub id: LedgerEntryId,
    pub wallet_id: WalletId,
    pub entry_type: String,
    pub amount: Decimal,
    pub idempotency_key: Option<String>,
    pub details: JsonValue,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&LedgerEntry> for LedgerEntryView {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: entry.id(),
            wallet_id: entry.wallet_id(),
            entry_type: entry.entry_type().to_string(),
            amount: entry.amount(),
            idempotency_key: entry.idempotency_key().map(str::to_string),
            details: entry.details().clone(),
            created_at: entry.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HoldView {
    pub id: HoldId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub status: HoldStatus,
    pub idempotency_key: String,
    pub reference: Option<String>,
    pub details: JsonValue,
}

impl From<&Hold> for HoldView {
    fn from(hold: &Hold) -> Self {
        Self {
            id: hold.id(),
            wallet_id: hold.wallet_id(),
            amount: hold.amount(),
            status: hold.status(),
            idempotency_key: hold.idempotency_key().to_string(),
            reference: hold.reference().map(str::to_string),
            details: hold.details().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransferView {
    pub id: TransferId,
    pub user_id: UserId,
    pub source_wallet_id: WalletId,
    pub target_wallet_id: WalletId,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransferStatus,
    pub idempotency_key: String,
    pub failure_reason: Option<String>,
    pub external_reference: Option<String>,
}

impl From<&Transfer> for TransferView {
    fn from(transfer: &Transfer) -> Self {
        Self {
            id: transfer.id(),
            user_id: transfer.user_id(),
            source_wallet_id: transfer.source_wallet_id(),
            target_wallet_id: transfer.target_wallet_id(),
            amount: transfer.amount(),
            currency: transfer.currency().to_string(),
            status: transfer.status(),
            idempotency_key: transfer.idempotency_key().to_string(),
            failure_reason: transfer.failure_reason().map(str::to_string),
            external_reference: transfer.external_reference().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransferOutcomeView {
    pub transfer: TransferView,
    pub source_wallet: WalletView,
    pub target_wallet: WalletView,
}

impl From<&TransferOutcome> for TransferOutcomeView {
    fn from(outcome: &TransferOutcome) -> Self {
        Self {
            transfer: (&outcome.transfer).into(),
            source_wallet: (&outcome.source_wallet).into(),
            target_wallet: (&outcome.target_wallet).into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReconciliationView {
    pub wallet_id: WalletId,
    pub stored_balance: Decimal,
    pub ledger_balance: Decimal,
    pub delta: Decimal,
    pub entry_count: i64,
    pub status: ReconciliationStatus,
}

impl From<&Reconciliation> for ReconciliationView {
    fn from(reconciliation: &Reconciliation) -> Self {
        Self {
            wallet_id: reconciliation.wallet_id,
            stored_balance: reconciliation.stored_balance,
            ledger_balance: reconciliation.ledger_balance,
            delta: reconciliation.delta,
            entry_count: reconciliation.entry_count,
            status: reconciliation.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatementView {
    pub wallet_id: WalletId,
    pub entries: Vec<LedgerEntryView>,
    pub next_cursor: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWalletRequest {
    pub currency: String,
    #[serde(default)]
    pub allow_additional: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApplyEntryRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub idempotency_key: Option<String>,
    #[serde(default, alias = "metadata")]
    pub details: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub target_wallet_id: WalletId,
    pub amount: Decimal,
    pub currency: String,
    pub idempotency_key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHoldRequest {
    pub amount: Decimal,
    pub idempotency_key: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub details: Option<JsonValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReleaseHoldRequest {
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}
