//! SQLx row models. Unlike the domain entities (private fields, built only
//! via `reconstitute`/builders), these mirror table columns directly and
//! convert into domain entities via `TryFrom`, matching the teacher's
//! `WalletModel`/`From<WalletModel> for Wallet` split but routed through
//! `reconstitute` so the same validation applies whether a row came from an
//! `INSERT ... RETURNING` or a plain `SELECT`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::FromRow;

use crate::domain::entities::{EntryType, Hold, HoldStatus, LedgerEntry, Transfer, TransferStatus, Wallet, WalletStatus};
use crate::domain::error::WalletError;
use crate::domain::types::{HoldId, LedgerEntryId, OutboxEventId, TransferId, UserId, WalletId};

#[derive(Debug, FromRow)]
pub struct WalletModel {
    pub id: WalletId,
    pub owner_user_id: UserId,
    pub currency: String,
    pub status: WalletStatus,
    pub balance: Decimal,
    pub allow_additional: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<WalletModel> for Wallet {
    type Error = WalletError;

    fn try_from(m: WalletModel) -> Result<Self, Self::Error> {
        Wallet::reconstitute(
            m.id,
            m.owner_user_id,
            m.currency,
            m.status,
            m.balance,
            m.created_at,
            m.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct LedgerEntryModel {
    pub id: LedgerEntryId,
    pub wallet_id: WalletId,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub idempotency_key: Option<String>,
    pub details: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntryModel> for LedgerEntry {
    fn from(m: LedgerEntryModel) -> Self {
        LedgerEntry::reconstitute(
            m.id,
            m.wallet_id,
            m.entry_type,
            m.amount,
            m.idempotency_key,
            m.details,
            m.created_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct HoldModel {
    pub id: HoldId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub status: HoldStatus,
    pub idempotency_key: String,
    pub reference: Option<String>,
    pub details: JsonValue,
    pub ledger_entry_id: LedgerEntryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HoldModel> for Hold {
    fn from(m: HoldModel) -> Self {
        Hold::reconstitute(
            m.id,
            m.wallet_id,
            m.amount,
            m.status,
            m.idempotency_key,
            m.reference,
            m.details,
            m.ledger_entry_id,
            m.created_at,
            m.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct TransferModel {
    pub id: TransferId,
    pub user_id: UserId,
    pub source_wallet_id: WalletId,
    pub target_wallet_id: WalletId,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransferStatus,
    pub idempotency_key: String,
    pub debit_entry_id: Option<LedgerEntryId>,
    pub credit_entry_id: Option<LedgerEntryId>,
    pub failure_reason: Option<String>,
    pub external_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransferModel> for Transfer {
    fn from(m: TransferModel) -> Self {
        Transfer::reconstitute(
            m.id,
            m.user_id,
            m.source_wallet_id,
            m.target_wallet_id,
            m.amount,
            m.currency,
            m.status,
            m.idempotency_key,
            m.debit_entry_id,
            m.credit_entry_id,
            m.failure_reason,
            m.external_reference,
            m.created_at,
            m.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
#[allow(dead_code)]
pub struct OutboxEventModel {
    pub id: OutboxEventId,
    pub event_type: String,
    pub payload: JsonValue,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}
