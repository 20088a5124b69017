use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::error::WalletError;
use crate::domain::types::{HoldId, LedgerEntryId, OutboxEventId, TransferId, UserId, WalletId};

/// spec.md §3: `Wallet.status ∈ {active, frozen}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    Active,
    Frozen,
}

/// A wallet row, as materialized from persistence. Always reached through
/// [`Wallet::builder`] (pre-insert) or [`Wallet::reconstitute`] (post-insert
/// / loaded) — the id is database-assigned, so there is no freestanding
/// `Wallet::new`.
///
/// # Examples
/// ```
/// use wallet_service::domain::entities::Wallet;
/// use wallet_service::domain::types::UserId;
///
/// let new_wallet = Wallet::builder()
///     .owner_user_id(UserId(7))
///     .currency("USD".to_string())
///     .build();
/// assert!(new_wallet.is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    id: WalletId,
    owner_user_id: UserId,
    currency: String,
    status: WalletStatus,
    balance: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Wallet {
    pub fn builder() -> WalletBuilder {
        WalletBuilder::default()
    }

    pub fn reconstitute(
        id: WalletId,
        owner_user_id: UserId,
        currency: String,
        status: WalletStatus,
        balance: Decimal,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, WalletError> {
        let currency = validate_currency(&currency)?;
        Ok(Self {
            id,
            owner_user_id,
            currency,
            status,
            balance,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> WalletId {
        self.id
    }

    pub fn owner_user_id(&self) -> UserId {
        self.owner_user_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn status(&self) -> WalletStatus {
        self.status
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate_currency(currency: &str) -> Result<String, WalletError> {
    let currency = currency.trim().to_uppercase();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(WalletError::InvalidData(
            "currency must be a 3-letter ISO code".into(),
        ));
    }
    Ok(currency)
}

/// A wallet not yet assigned an id — the shape `createWallet` inserts.
pub struct NewWallet {
    pub owner_user_id: UserId,
    pub currency: String,
}

#[derive(Default)]
pub struct WalletBuilder {
    owner_user_id: Option<UserId>,
    currency: Option<String>,
}

impl WalletBuilder {
    pub fn owner_user_id(mut self, owner_user_id: UserId) -> Self {
        self.owner_user_id = Some(owner_user_id);
        self
    }

    pub fn currency(mut self, currency: String) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn build(self) -> Result<NewWallet, WalletError> {
        let owner_user_id = self
            .owner_user_id
            .ok_or_else(|| WalletError::InvalidData("owner_user_id is required".into()))?;
        let currency = self
            .currency
            .ok_or_else(|| WalletError::InvalidData("currency is required".into()))?;
        let currency = validate_currency(&currency)?;

        Ok(NewWallet {
            owner_user_id,
            currency,
        })
    }
}

/// spec.md §3: `LedgerEntry.type ∈ {credit, debit}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Credit,
    Debit,
}

/// An append-only ledger row. Never mutated or deleted once inserted
/// (spec.md §3, §8 invariant 3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    id: LedgerEntryId,
    wallet_id: WalletId,
    entry_type: EntryType,
    amount: Decimal,
    idempotency_key: Option<String>,
    details: JsonValue,
    created_at: DateTime<Utc>,
}

impl LedgerEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: LedgerEntryId,
        wallet_id: WalletId,
        entry_type: EntryType,
        amount: Decimal,
        idempotency_key: Option<String>,
        details: JsonValue,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            wallet_id,
            entry_type,
            amount,
            idempotency_key,
            details,
            created_at,
        }
    }

    pub fn id(&self) -> LedgerEntryId {
        self.id
    }

    pub fn wallet_id(&self) -> WalletId {
        self.wallet_id
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    pub fn details(&self) -> &JsonValue {
        &self.details
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// spec.md §3: `Hold.status ∈ {active, captured, released}`; transitions are
/// one-shot (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HoldStatus {
    Active,
    Captured,
    Released,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hold {
    id: HoldId,
    wallet_id: WalletId,
    amount: Decimal,
    status: HoldStatus,
    idempotency_key: String,
    reference: Option<String>,
    details: JsonValue,
    ledger_entry_id: LedgerEntryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Hold {
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: HoldId,
        wallet_id: WalletId,
        amount: Decimal,
        status: HoldStatus,
        idempotency_key: String,
        reference: Option<String>,
        details: JsonValue,
        ledger_entry_id: LedgerEntryId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            wallet_id,
            amount,
            status,
            idempotency_key,
            reference,
            details,
            ledger_entry_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> HoldId {
        self.id
    }

    pub fn wallet_id(&self) -> WalletId {
        self.wallet_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> HoldStatus {
        self.status
    }

    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn details(&self) -> &JsonValue {
        &self.details
    }

    pub fn ledger_entry_id(&self) -> LedgerEntryId {
        self.ledger_entry_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// spec.md §3: `Transfer.status ∈ {pending, completed, failed, reversed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Completed,
    Failed,
    Reversed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    id: TransferId,
    user_id: UserId,
    source_wallet_id: WalletId,
    target_wallet_id: WalletId,
    amount: Decimal,
    currency: String,
    status: TransferStatus,
    idempotency_key: String,
    debit_entry_id: Option<LedgerEntryId>,
    credit_entry_id: Option<LedgerEntryId>,
    failure_reason: Option<String>,
    external_reference: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transfer {
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TransferId,
        user_id: UserId,
        source_wallet_id: WalletId,
        target_wallet_id: WalletId,
        amount: Decimal,
        currency: String,
        status: TransferStatus,
        idempotency_key: String,
        debit_entry_id: Option<LedgerEntryId>,
        credit_entry_id: Option<LedgerEntryId>,
        failure_reason: Option<String>,
        external_reference: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            source_wallet_id,
            target_wallet_id,
            amount,
            currency,
            status,
            idempotency_key,
            debit_entry_id,
            credit_entry_id,
            failure_reason,
            external_reference,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TransferId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn source_wallet_id(&self) -> WalletId {
        self.source_wallet_id
    }

    pub fn target_wallet_id(&self) -> WalletId {
        self.target_wallet_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    pub fn debit_entry_id(&self) -> Option<LedgerEntryId> {
        self.debit_entry_id
    }

    pub fn credit_entry_id(&self) -> Option<LedgerEntryId> {
        self.credit_entry_id
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn external_reference(&self) -> Option<&str> {
        self.external_reference.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Written in the same transaction as the state change it describes
/// (spec.md §3, §4.2 "Outbox semantics"). The relay that drains this table
/// is out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    id: OutboxEventId,
    event_type: String,
    payload: JsonValue,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl OutboxEvent {
    pub fn reconstitute(
        id: OutboxEventId,
        event_type: String,
        payload: JsonValue,
        created_at: DateTime<Utc>,
        processed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            event_type,
            payload,
            created_at,
            processed_at,
        }
    }

    pub fn id(&self) -> OutboxEventId {
        self.id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }
}
