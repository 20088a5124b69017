//! Ledger-math integration tests against an in-memory fake repository,
//! following the teacher's `FakeWalletGateway`-style fakes (no live Postgres,
//! since the toolchain is not run in this exercise — SPEC_FULL.md §8).
//! These port spec.md §8's core invariant scenarios (S1, S2, S3, S7) against
//! real balance/hold/transfer/reconciliation arithmetic rather than a mock
//! returning canned values.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{json, Value as JsonValue};

use wallet_service::domain::entities::{EntryType, Hold, HoldStatus, LedgerEntry, Transfer, TransferStatus, Wallet, WalletStatus};
use wallet_service::domain::error::WalletError;
use wallet_service::domain::repository::{Reconciliation, ReconciliationStatus, TransferOutcome, WalletRepository};
use wallet_service::domain::types::{HoldId, LedgerEntryId, TransferId, UserId, WalletId};

#[derive(Clone)]
struct WalletRow {
    owner_user_id: UserId,
    currency: String,
    status: WalletStatus,
    balance: Decimal,
    allow_additional: bool,
}

#[derive(Clone)]
struct LedgerRow {
    id: i64,
    wallet_id: i64,
    entry_type: EntryType,
    amount: Decimal,
    idempotency_key: Option<String>,
    details: JsonValue,
}

#[derive(Clone)]
struct HoldRow {
    id: i64,
    wallet_id: i64,
    amount: Decimal,
    status: HoldStatus,
    idempotency_key: String,
    reference: Option<String>,
    details: JsonValue,
    ledger_entry_id: i64,
}

#[derive(Clone)]
struct TransferRow {
    id: i64,
    user_id: UserId,
    source_wallet_id: i64,
    target_wallet_id: i64,
    amount: Decimal,
    currency: String,
    status: TransferStatus,
    idempotency_key: String,
    debit_entry_id: Option<i64>,
    credit_entry_id: Option<i64>,
    failure_reason: Option<String>,
    external_reference: Option<String>,
}

#[derive(Default)]
struct Inner {
    wallets: HashMap<i64, WalletRow>,
    ledger: Vec<LedgerRow>,
    holds: HashMap<i64, HoldRow>,
    transfers_by_key: HashMap<String, i64>,
    transfers: HashMap<i64, TransferRow>,
    next_wallet_id: i64,
    next_ledger_id: i64,
    next_hold_id: i64,
    next_transfer_id: i64,
}

/// Mirrors `PostgresWalletRepository`'s locking/idempotency/business-rule
/// sequencing, but over a `Mutex<Inner>` instead of a Postgres transaction —
/// single-threaded tests don't need row locks, only the same decision order.
#[derive(Default)]
struct FakeWalletRepository {
    inner: Mutex<Inner>,
}

fn to_wallet(id: i64, row: &WalletRow) -> Result<Wallet, WalletError> {
    Wallet::reconstitute(
        WalletId(id),
        row.owner_user_id,
        row.currency.clone(),
        row.status,
        row.balance,
        Utc::now(),
        Utc::now(),
    )
}

fn to_ledger_entry(row: &LedgerRow) -> LedgerEntry {
    LedgerEntry::reconstitute(
        LedgerEntryId(row.id),
        WalletId(row.wallet_id),
        row.entry_type,
        row.amount,
        row.idempotency_key.clone(),
        row.details.clone(),
        Utc::now(),
    )
}

fn to_hold(row: &HoldRow) -> Hold {
    Hold::reconstitute(
        HoldId(row.id),
        WalletId(row.wallet_id),
        row.amount,
        row.status,
        row.idempotency_key.clone(),
        row.reference.clone(),
        row.details.clone(),
        LedgerEntryId(row.ledger_entry_id),
        Utc::now(),
        Utc::now(),
    )
}

fn to_transfer(row: &TransferRow) -> Transfer {
    Transfer::reconstitute(
        TransferId(row.id),
        row.user_id,
        WalletId(row.source_wallet_id),
        WalletId(row.target_wallet_id),
        row.amount,
        row.currency.clone(),
        row.status,
        row.idempotency_key.clone(),
        row.debit_entry_id.map(LedgerEntryId),
        row.credit_entry_id.map(LedgerEntryId),
        row.failure_reason.clone(),
        row.external_reference.clone(),
        Utc::now(),
        Utc::now(),
    )
}

#[async_trait]
impl WalletRepository for FakeWalletRepository {
    async fn create_wallet(
        &self,
        owner_user_id: UserId,
        currency: String,
        allow_additional: bool,
    ) -> Result<(Wallet, bool), WalletError> {
        let new_wallet = Wallet::builder()
            .owner_user_id(owner_user_id)
            .currency(currency)
            .build()?;
        let mut inner = self.inner.lock().unwrap();

        if !allow_additional {
            if let Some((&id, row)) = inner
                .wallets
                .iter()
                .find(|(_, row)| row.owner_user_id == owner_user_id && row.currency == new_wallet.currency)
            {
                let wallet = to_wallet(id, row)?;
                return Ok((wallet, false));
            }
        }

        inner.next_wallet_id += 1;
        let id = inner.next_wallet_id;
        let row = WalletRow {
            owner_user_id,
            currency: new_wallet.currency,
            status: WalletStatus::Active,
            balance: Decimal::ZERO,
            allow_additional,
        };
        let wallet = to_wallet(id, &row)?;
        inner.wallets.insert(id, row);
        Ok((wallet, true))
    }

    async fn find_wallet(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Wallet, WalletError> {
        let inner = self.inner.lock().unwrap();
        let row = inner
            .wallets
            .get(&wallet_id.0)
            .filter(|row| row.owner_user_id == owner_user_id)
            .ok_or(WalletError::NotFound(wallet_id))?;
        to_wallet(wallet_id.0, row)
    }

    async fn apply_entry(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        entry_type: EntryType,
        amount: Decimal,
        idempotency_key: Option<String>,
        details: JsonValue,
    ) -> Result<(Wallet, LedgerEntry, bool), WalletError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .wallets
            .get(&wallet_id.0)
            .filter(|row| row.owner_user_id == owner_user_id)
            .ok_or(WalletError::NotFound(wallet_id))?;

        if let Some(key) = &idempotency_key {
            if let Some(existing) = inner
                .ledger
                .iter()
                .find(|entry| entry.wallet_id == wallet_id.0 && entry.idempotency_key.as_deref() == Some(key.as_str()))
                .cloned()
            {
                let row = inner.wallets.get(&wallet_id.0).unwrap().clone();
                let wallet = to_wallet(wallet_id.0, &row)?;
                return Ok((wallet, to_ledger_entry(&existing), true));
            }
        }

        let row = inner.wallets.get_mut(&wallet_id.0).unwrap();
        let new_balance = match entry_type {
            EntryType::Credit => row.balance + amount,
            EntryType::Debit => {
                if row.balance < amount {
                    return Err(WalletError::InsufficientFunds(wallet_id));
                }
                row.balance - amount
            }
        };
        row.balance = new_balance;
        let updated_row = row.clone();

        inner.next_ledger_id += 1;
        let ledger_id = inner.next_ledger_id;
        let ledger_row = LedgerRow {
            id: ledger_id,
            wallet_id: wallet_id.0,
            entry_type,
            amount,
            idempotency_key,
            details,
        };
        inner.ledger.push(ledger_row.clone());

        Ok((to_wallet(wallet_id.0, &updated_row)?, to_ledger_entry(&ledger_row), false))
    }

    async fn create_hold(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        amount: Decimal,
        idempotency_key: String,
        reference: Option<String>,
        details: JsonValue,
    ) -> Result<(Hold, bool), WalletError> {
        let mut inner = self.inner.lock().unwrap();
        {
            inner
                .wallets
                .get(&wallet_id.0)
                .filter(|row| row.owner_user_id == owner_user_id)
                .ok_or(WalletError::NotFound(wallet_id))?;
        }

        if let Some(existing) = inner
            .holds
            .values()
            .find(|hold| hold.wallet_id == wallet_id.0 && hold.idempotency_key == idempotency_key)
            .cloned()
        {
            return Ok((to_hold(&existing), true));
        }

        let row = inner.wallets.get_mut(&wallet_id.0).unwrap();
        if row.balance < amount {
            return Err(WalletError::InsufficientFunds(wallet_id));
        }
        row.balance -= amount;

        inner.next_ledger_id += 1;
        let ledger_id = inner.next_ledger_id;
        inner.ledger.push(LedgerRow {
            id: ledger_id,
            wallet_id: wallet_id.0,
            entry_type: EntryType::Debit,
            amount,
            idempotency_key: Some(format!("hold-{idempotency_key}")),
            details: json!({"reason": "hold", "hold_idempotency_key": idempotency_key}),
        });

        inner.next_hold_id += 1;
        let hold_id = inner.next_hold_id;
        let hold_row = HoldRow {
            id: hold_id,
            wallet_id: wallet_id.0,
            amount,
            status: HoldStatus::Active,
            idempotency_key,
            reference,
            details,
            ledger_entry_id: ledger_id,
        };
        inner.holds.insert(hold_id, hold_row.clone());
        Ok((to_hold(&hold_row), false))
    }

    async fn release_hold(&self, wallet_id: WalletId, owner_user_id: UserId, hold_id: HoldId) -> Result<Hold, WalletError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .wallets
            .get(&wallet_id.0)
            .filter(|row| row.owner_user_id == owner_user_id)
            .ok_or(WalletError::NotFound(wallet_id))?;

        let hold_row = inner
            .holds
            .get(&hold_id.0)
            .filter(|hold| hold.wallet_id == wallet_id.0)
            .cloned()
            .ok_or(WalletError::HoldNotFound)?;

        match hold_row.status {
            HoldStatus::Released => return Ok(to_hold(&hold_row)),
            HoldStatus::Captured => {
                return Err(WalletError::IllegalTransition(
                    "hold already captured, cannot release".into(),
                ))
            }
            HoldStatus::Active => {}
        }

        let row = inner.wallets.get_mut(&wallet_id.0).unwrap();
        row.balance += hold_row.amount;

        inner.next_ledger_id += 1;
        let ledger_id = inner.next_ledger_id;
        inner.ledger.push(LedgerRow {
            id: ledger_id,
            wallet_id: wallet_id.0,
            entry_type: EntryType::Credit,
            amount: hold_row.amount,
            idempotency_key: Some(format!("hold-release-{}", hold_row.idempotency_key)),
            details: json!({"reason": "hold_release", "hold_id": hold_id.0}),
        });

        let updated = inner.holds.get_mut(&hold_id.0).unwrap();
        updated.status = HoldStatus::Released;
        Ok(to_hold(updated))
    }

    async fn capture_hold(&self, wallet_id: WalletId, owner_user_id: UserId, hold_id: HoldId) -> Result<Hold, WalletError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .wallets
            .get(&wallet_id.0)
            .filter(|row| row.owner_user_id == owner_user_id)
            .ok_or(WalletError::NotFound(wallet_id))?;

        let hold_row = inner
            .holds
            .get(&hold_id.0)
            .filter(|hold| hold.wallet_id == wallet_id.0)
            .cloned()
            .ok_or(WalletError::HoldNotFound)?;

        match hold_row.status {
            HoldStatus::Captured => return Ok(to_hold(&hold_row)),
            HoldStatus::Released => {
                return Err(WalletError::IllegalTransition(
                    "hold already released, cannot capture".into(),
                ))
            }
            HoldStatus::Active => {}
        }

        let updated = inner.holds.get_mut(&hold_id.0).unwrap();
        updated.status = HoldStatus::Captured;
        Ok(to_hold(updated))
    }

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
    ) -> Result<TransferOutcome, WalletError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(&existing_id) = inner.transfers_by_key.get(&idempotency_key) {
            let existing = inner.transfers.get(&existing_id).unwrap().clone();
            let source_row = inner.wallets.get(&existing.source_wallet_id).unwrap().clone();
            let target_row = inner.wallets.get(&existing.target_wallet_id).unwrap().clone();
            return Ok(TransferOutcome {
                transfer: to_transfer(&existing),
                source_wallet: to_wallet(existing.source_wallet_id, &source_row)?,
                target_wallet: to_wallet(existing.target_wallet_id, &target_row)?,
            });
        }

        let source_row = inner
            .wallets
            .get(&source_wallet_id.0)
            .cloned()
            .ok_or(WalletError::NotFound(source_wallet_id))?;
        let target_row = inner
            .wallets
            .get(&target_wallet_id.0)
            .cloned()
            .ok_or(WalletError::NotFound(target_wallet_id))?;

        if source_row.owner_user_id != user_id || target_row.owner_user_id != user_id {
            return Err(WalletError::Forbidden);
        }
        if source_row.currency != currency || target_row.currency != currency {
            return Err(WalletError::InvalidData(
                "source, target and transfer currency must all match".into(),
            ));
        }

        inner.next_transfer_id += 1;
        let transfer_id = inner.next_transfer_id;
        inner.transfers_by_key.insert(idempotency_key.clone(), transfer_id);

        let transfer_details = json!({
            "reason": "transfer",
            "transfer_id": transfer_id,
            "description": description,
        });

        if source_row.balance < amount {
            inner.transfers.insert(
                transfer_id,
                TransferRow {
                    id: transfer_id,
                    user_id,
                    source_wallet_id: source_wallet_id.0,
                    target_wallet_id: target_wallet_id.0,
                    amount,
                    currency,
                    status: TransferStatus::Failed,
                    idempotency_key,
                    debit_entry_id: None,
                    credit_entry_id: None,
                    failure_reason: Some("insufficient funds".to_string()),
                    external_reference,
                },
            );
            return Err(WalletError::InsufficientFunds(source_wallet_id));
        }

        inner.wallets.get_mut(&source_wallet_id.0).unwrap().balance -= amount;
        inner.wallets.get_mut(&target_wallet_id.0).unwrap().balance += amount;

        inner.next_ledger_id += 1;
        let debit_id = inner.next_ledger_id;
        inner.ledger.push(LedgerRow {
            id: debit_id,
            wallet_id: source_wallet_id.0,
            entry_type: EntryType::Debit,
            amount,
            idempotency_key: Some(format!("wallet-transfer-debit-{transfer_id}")),
            details: transfer_details.clone(),
        });

        inner.next_ledger_id += 1;
        let credit_id = inner.next_ledger_id;
        inner.ledger.push(LedgerRow {
            id: credit_id,
            wallet_id: target_wallet_id.0,
            entry_type: EntryType::Credit,
            amount,
            idempotency_key: Some(format!("wallet-transfer-credit-{transfer_id}")),
            details: transfer_details,
        });

        let transfer_row = TransferRow {
            id: transfer_id,
            user_id,
            source_wallet_id: source_wallet_id.0,
            target_wallet_id: target_wallet_id.0,
            amount,
            currency,
            status: TransferStatus::Completed,
            idempotency_key,
            debit_entry_id: Some(debit_id),
            credit_entry_id: Some(credit_id),
            failure_reason: None,
            external_reference,
        };
        inner.transfers.insert(transfer_id, transfer_row.clone());

        let updated_source = inner.wallets.get(&source_wallet_id.0).unwrap().clone();
        let updated_target = inner.wallets.get(&target_wallet_id.0).unwrap().clone();

        Ok(TransferOutcome {
            transfer: to_transfer(&transfer_row),
            source_wallet: to_wallet(source_wallet_id.0, &updated_source)?,
            target_wallet: to_wallet(target_wallet_id.0, &updated_target)?,
        })
    }

    async fn list_statement(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        limit: i64,
        cursor: Option<i64>,
    ) -> Result<(Vec<LedgerEntry>, Option<i64>), WalletError> {
        let inner = self.inner.lock().unwrap();
        inner
            .wallets
            .get(&wallet_id.0)
            .filter(|row| row.owner_user_id == owner_user_id)
            .ok_or(WalletError::NotFound(wallet_id))?;

        let mut rows: Vec<&LedgerRow> = inner
            .ledger
            .iter()
            .filter(|row| row.wallet_id == wallet_id.0 && cursor.map(|c| row.id < c).unwrap_or(true))
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows.truncate(limit as usize);

        let last_id = rows.last().map(|row| row.id);
        Ok((rows.into_iter().map(to_ledger_entry).collect(), last_id))
    }

    async fn reconcile(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Reconciliation, WalletError> {
        let inner = self.inner.lock().unwrap();
        let row = inner
            .wallets
            .get(&wallet_id.0)
            .filter(|row| row.owner_user_id == owner_user_id)
            .ok_or(WalletError::NotFound(wallet_id))?;

        let entries: Vec<&LedgerRow> = inner.ledger.iter().filter(|entry| entry.wallet_id == wallet_id.0).collect();
        let credit_sum: Decimal = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Credit)
            .map(|e| e.amount)
            .sum();
        let debit_sum: Decimal = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Debit)
            .map(|e| e.amount)
            .sum();
        let ledger_balance = credit_sum - debit_sum;
        let delta = row.balance - ledger_balance;
        let status = if delta == Decimal::ZERO {
            ReconciliationStatus::Balanced
        } else {
            ReconciliationStatus::DriftDetected
        };

        Ok(Reconciliation {
            wallet_id,
            stored_balance: row.balance,
            ledger_balance,
            delta,
            entry_count: entries.len() as i64,
            status,
        })
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn s1_credit_and_debit_basics() {
    let repo = FakeWalletRepository::default();
    let (wallet, created) = repo.create_wallet(UserId(1), "USD".to_string(), false).await.unwrap();
    assert!(created);

    let (wallet, _entry, replayed) = repo
        .apply_entry(
            wallet.id(),
            UserId(1),
            EntryType::Credit,
            dec("100.00"),
            Some("c1".to_string()),
            JsonValue::Null,
        )
        .await
        .unwrap();
    assert!(!replayed);
    assert_eq!(wallet.balance(), dec("100.00"));

    let (wallet, _entry, replayed) = repo
        .apply_entry(
            wallet.id(),
            UserId(1),
            EntryType::Credit,
            dec("100.00"),
            Some("c1".to_string()),
            JsonValue::Null,
        )
        .await
        .unwrap();
    assert!(replayed);
    assert_eq!(wallet.balance(), dec("100.00"));

    let (wallet, _entry, _replayed) = repo
        .apply_entry(wallet.id(), UserId(1), EntryType::Debit, dec("40.00"), None, JsonValue::Null)
        .await
        .unwrap();
    assert_eq!(wallet.balance(), dec("60.00"));

    let err = repo
        .apply_entry(wallet.id(), UserId(1), EntryType::Debit, dec("100.00"), None, JsonValue::Null)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InsufficientFunds(_)));

    let wallet = repo.find_wallet(wallet.id(), UserId(1)).await.unwrap();
    assert_eq!(wallet.balance(), dec("60.00"));
}

#[tokio::test]
async fn s2_transfer_is_idempotent() {
    let repo = FakeWalletRepository::default();
    let (wallet_a, _) = repo.create_wallet(UserId(2), "USD".to_string(), false).await.unwrap();
    let (wallet_b, _) = repo.create_wallet(UserId(2), "USD".to_string(), true).await.unwrap();

    repo.apply_entry(
        wallet_a.id(),
        UserId(2),
        EntryType::Credit,
        dec("75.00"),
        None,
        JsonValue::Null,
    )
    .await
    .unwrap();

    let outcome = repo
        .transfer(
            UserId(2),
            wallet_a.id(),
            wallet_b.id(),
            dec("25.00"),
            "USD".to_string(),
            "t1".to_string(),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(outcome.source_wallet.balance(), dec("50.00"));
    assert_eq!(outcome.target_wallet.balance(), dec("25.00"));

    let (before_statement, _) = repo.list_statement(wallet_a.id(), UserId(2), 100, None).await.unwrap();

    let replay = repo
        .transfer(
            UserId(2),
            wallet_a.id(),
            wallet_b.id(),
            dec("25.00"),
            "USD".to_string(),
            "t1".to_string(),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(replay.source_wallet.balance(), dec("50.00"));
    assert_eq!(replay.target_wallet.balance(), dec("25.00"));

    let (after_statement, _) = repo.list_statement(wallet_a.id(), UserId(2), 100, None).await.unwrap();
    assert_eq!(before_statement.len(), after_statement.len());
}

#[tokio::test]
async fn s3_hold_lifecycle() {
    let repo = FakeWalletRepository::default();
    let (wallet, _) = repo.create_wallet(UserId(3), "USD".to_string(), false).await.unwrap();
    repo.apply_entry(wallet.id(), UserId(3), EntryType::Credit, dec("60.00"), None, JsonValue::Null)
        .await
        .unwrap();

    let (hold, created) = repo
        .create_hold(
            wallet.id(),
            UserId(3),
            dec("15.00"),
            "h1".to_string(),
            None,
            JsonValue::Null,
        )
        .await
        .unwrap();
    assert!(created);
    assert_eq!(hold.status(), HoldStatus::Active);
    let wallet = repo.find_wallet(wallet.id(), UserId(3)).await.unwrap();
    assert_eq!(wallet.balance(), dec("45.00"));

    let released = repo.release_hold(wallet.id(), UserId(3), hold.id()).await.unwrap();
    assert_eq!(released.status(), HoldStatus::Released);
    let wallet = repo.find_wallet(wallet.id(), UserId(3)).await.unwrap();
    assert_eq!(wallet.balance(), dec("60.00"));

    let replay = repo.release_hold(wallet.id(), UserId(3), hold.id()).await.unwrap();
    assert_eq!(replay.status(), HoldStatus::Released);
    let wallet = repo.find_wallet(wallet.id(), UserId(3)).await.unwrap();
    assert_eq!(wallet.balance(), dec("60.00"));

    let (hold2, _) = repo
        .create_hold(
            wallet.id(),
            UserId(3),
            dec("10.00"),
            "h2".to_string(),
            None,
            JsonValue::Null,
        )
        .await
        .unwrap();
    let captured = repo.capture_hold(wallet.id(), UserId(3), hold2.id()).await.unwrap();
    assert_eq!(captured.status(), HoldStatus::Captured);
    let wallet = repo.find_wallet(wallet.id(), UserId(3)).await.unwrap();
    assert_eq!(wallet.balance(), dec("50.00"));
}

#[tokio::test]
async fn s7_reconciliation_after_arbitrary_activity() {
    let repo = FakeWalletRepository::default();
    let (wallet, _) = repo.create_wallet(UserId(4), "USD".to_string(), false).await.unwrap();

    repo.apply_entry(wallet.id(), UserId(4), EntryType::Credit, dec("200.00"), None, JsonValue::Null)
        .await
        .unwrap();
    repo.apply_entry(wallet.id(), UserId(4), EntryType::Debit, dec("50.00"), None, JsonValue::Null)
        .await
        .unwrap();
    let (hold, _) = repo
        .create_hold(
            wallet.id(),
            UserId(4),
            dec("30.00"),
            "rh1".to_string(),
            None,
            JsonValue::Null,
        )
        .await
        .unwrap();
    repo.capture_hold(wallet.id(), UserId(4), hold.id()).await.unwrap();
    repo.apply_entry(wallet.id(), UserId(4), EntryType::Credit, dec("10.00"), None, JsonValue::Null)
        .await
        .unwrap();

    let reconciliation = repo.reconcile(wallet.id(), UserId(4)).await.unwrap();
    assert_eq!(reconciliation.status, ReconciliationStatus::Balanced);
    assert_eq!(reconciliation.delta, Decimal::ZERO);
}
