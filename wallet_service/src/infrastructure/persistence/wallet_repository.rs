//! `PostgresWalletRepository`: the single place every lock, idempotency
//! pre-check, and business-rule check from spec.md §4.2 lives, mirroring
//! how the teacher's `update_balance` combines locking and validation in
//! the infrastructure layer rather than spreading it across a use case.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value as JsonValue};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entities::{EntryType, Hold, HoldStatus, LedgerEntry, Wallet};
use crate::domain::error::WalletError;
use crate::domain::repository::{Reconciliation, ReconciliationStatus, TransferOutcome, WalletRepository};
use crate::domain::types::{HoldId, UserId, WalletId};
use crate::infrastructure::persistence::models::{HoldModel, LedgerEntryModel, TransferModel, WalletModel};

pub struct PostgresWalletRepository {
    pool: PgPool,
}

impl PostgresWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Acquires the row lock required by spec.md §4.2's concurrency note and
/// enforces wallet ownership in the same query.
async fn lock_owned_wallet(
    tx: &mut Transaction<'_, Postgres>,
    wallet_id: WalletId,
    owner_user_id: UserId,
) -> Result<WalletModel, WalletError> {
    sqlx::query_as::<_, WalletModel>(
        "SELECT id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at
         FROM wallets WHERE id = $1 AND owner_user_id = $2 FOR UPDATE",
    )
    .bind(wallet_id)
    .bind(owner_user_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(WalletError::NotFound(wallet_id))
}

/// Same lock, without the ownership filter — used by `transfer`, which
/// checks both wallets belong to the caller only after both locks are held
/// in ascending id order (spec.md §4.2).
async fn lock_wallet_by_id(tx: &mut Transaction<'_, Postgres>, wallet_id: WalletId) -> Result<WalletModel, WalletError> {
    sqlx::query_as::<_, WalletModel>(
        "SELECT id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at
         FROM wallets WHERE id = $1 FOR UPDATE",
    )
    .bind(wallet_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(WalletError::NotFound(wallet_id))
}

async fn fetch_wallet_plain(tx: &mut Transaction<'_, Postgres>, wallet_id: WalletId) -> Result<WalletModel, WalletError> {
    sqlx::query_as::<_, WalletModel>(
        "SELECT id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at FROM wallets WHERE id = $1",
    )
    .bind(wallet_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(WalletError::NotFound(wallet_id))
}

#[async_trait]
impl WalletRepository for PostgresWalletRepository {
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

        let mut tx = self.pool.begin().await?;

        if !allow_additional {
            if let Some(existing) = sqlx::query_as::<_, WalletModel>(
                "SELECT id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at
                 FROM wallets WHERE owner_user_id = $1 AND currency = $2 FOR UPDATE",
            )
            .bind(owner_user_id)
            .bind(&new_wallet.currency)
            .fetch_optional(&mut *tx)
            .await?
            {
                tx.commit().await?;
                return Ok((existing.try_into()?, false));
            }
        }

        let inserted = sqlx::query_as::<_, WalletModel>(
            "INSERT INTO wallets (owner_user_id, currency, status, balance, allow_additional, created_at, updated_at)
             VALUES ($1, $2, 'active', 0, $3, now(), now())
             RETURNING id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at",
        )
        .bind(owner_user_id)
        .bind(&new_wallet.currency)
        .bind(allow_additional)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((inserted.try_into()?, true))
    }

    async fn find_wallet(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Wallet, WalletError> {
        sqlx::query_as::<_, WalletModel>(
            "SELECT id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at
             FROM wallets WHERE id = $1 AND owner_user_id = $2",
        )
        .bind(wallet_id)
        .bind(owner_user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(WalletError::NotFound(wallet_id))?
        .try_into()
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
        let mut tx = self.pool.begin().await?;
        let wallet_model = lock_owned_wallet(&mut tx, wallet_id, owner_user_id).await?;

        if let Some(key) = &idempotency_key {
            if let Some(existing) = sqlx::query_as::<_, LedgerEntryModel>(
                "SELECT id, wallet_id, entry_type, amount, idempotency_key, details, created_at
                 FROM ledger_entries WHERE wallet_id = $1 AND idempotency_key = $2",
            )
            .bind(wallet_id)
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?
            {
                tx.commit().await?;
                return Ok((wallet_model.try_into()?, existing.into(), true));
            }
        }

        let new_balance = match entry_type {
            EntryType::Credit => wallet_model.balance + amount,
            EntryType::Debit => {
                if wallet_model.balance < amount {
                    return Err(WalletError::InsufficientFunds(wallet_id));
                }
                wallet_model.balance - amount
            }
        };

        let updated_wallet = sqlx::query_as::<_, WalletModel>(
            "UPDATE wallets SET balance = $1, updated_at = now() WHERE id = $2
             RETURNING id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at",
        )
        .bind(new_balance)
        .bind(wallet_id)
        .fetch_one(&mut *tx)
        .await?;

        let entry = sqlx::query_as::<_, LedgerEntryModel>(
            "INSERT INTO ledger_entries (wallet_id, entry_type, amount, idempotency_key, details, created_at)
             VALUES ($1, $2, $3, $4, $5, now())
             RETURNING id, wallet_id, entry_type, amount, idempotency_key, details, created_at",
        )
        .bind(wallet_id)
        .bind(entry_type)
        .bind(amount)
        .bind(&idempotency_key)
        .bind(&details)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((updated_wallet.try_into()?, entry.into(), false))
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
        let mut tx = self.pool.begin().await?;
        let wallet_model = lock_owned_wallet(&mut tx, wallet_id, owner_user_id).await?;

        if let Some(existing) = sqlx::query_as::<_, HoldModel>(
            "SELECT id, wallet_id, amount, status, idempotency_key, reference, details, ledger_entry_id, created_at, updated_at
             FROM wallet_holds WHERE wallet_id = $1 AND idempotency_key = $2",
        )
        .bind(wallet_id)
        .bind(&idempotency_key)
        .fetch_optional(&mut *tx)
        .await?
        {
            tx.commit().await?;
            return Ok((existing.into(), true));
        }

        if wallet_model.balance < amount {
            return Err(WalletError::InsufficientFunds(wallet_id));
        }

        let new_balance = wallet_model.balance - amount;
        sqlx::query("UPDATE wallets SET balance = $1, updated_at = now() WHERE id = $2")
            .bind(new_balance)
            .bind(wallet_id)
            .execute(&mut *tx)
            .await?;

        let entry = sqlx::query_as::<_, LedgerEntryModel>(
            "INSERT INTO ledger_entries (wallet_id, entry_type, amount, idempotency_key, details, created_at)
             VALUES ($1, 'debit', $2, $3, $4, now())
             RETURNING id, wallet_id, entry_type, amount, idempotency_key, details, created_at",
        )
        .bind(wallet_id)
        .bind(amount)
        .bind(format!("hold-{idempotency_key}"))
        .bind(json!({"reason": "hold", "hold_idempotency_key": idempotency_key}))
        .fetch_one(&mut *tx)
        .await?;

        let hold = sqlx::query_as::<_, HoldModel>(
            "INSERT INTO wallet_holds (wallet_id, amount, status, idempotency_key, reference, details, ledger_entry_id, created_at, updated_at)
             VALUES ($1, $2, 'active', $3, $4, $5, $6, now(), now())
             RETURNING id, wallet_id, amount, status, idempotency_key, reference, details, ledger_entry_id, created_at, updated_at",
        )
        .bind(wallet_id)
        .bind(amount)
        .bind(&idempotency_key)
        .bind(&reference)
        .bind(&details)
        .bind(entry.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((hold.into(), false))
    }

    async fn release_hold(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        hold_id: HoldId,
    ) -> Result<Hold, WalletError> {
        let mut tx = self.pool.begin().await?;
        lock_owned_wallet(&mut tx, wallet_id, owner_user_id).await?;

        let hold_model = sqlx::query_as::<_, HoldModel>(
            "SELECT id, wallet_id, amount, status, idempotency_key, reference, details, ledger_entry_id, created_at, updated_at
             FROM wallet_holds WHERE id = $1 AND wallet_id = $2 FOR UPDATE",
        )
        .bind(hold_id)
        .bind(wallet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WalletError::HoldNotFound)?;

        match hold_model.status {
            HoldStatus::Released => {
                tx.commit().await?;
                return Ok(hold_model.into());
            }
            HoldStatus::Captured => {
                return Err(WalletError::IllegalTransition(
                    "hold already captured, cannot release".into(),
                ))
            }
            HoldStatus::Active => {}
        }

        sqlx::query("UPDATE wallets SET balance = balance + $1, updated_at = now() WHERE id = $2")
            .bind(hold_model.amount)
            .bind(wallet_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO ledger_entries (wallet_id, entry_type, amount, idempotency_key, details, created_at)
             VALUES ($1, 'credit', $2, $3, $4, now())",
        )
        .bind(wallet_id)
        .bind(hold_model.amount)
        .bind(format!("hold-release-{}", hold_model.idempotency_key))
        .bind(json!({"reason": "hold_release", "hold_id": hold_id.0}))
        .execute(&mut *tx)
        .await?;

        let updated_hold = sqlx::query_as::<_, HoldModel>(
            "UPDATE wallet_holds SET status = 'released', updated_at = now() WHERE id = $1
             RETURNING id, wallet_id, amount, status, idempotency_key, reference, details, ledger_entry_id, created_at, updated_at",
        )
        .bind(hold_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated_hold.into())
    }

    async fn capture_hold(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        hold_id: HoldId,
    ) -> Result<Hold, WalletError> {
        let mut tx = self.pool.begin().await?;
        lock_owned_wallet(&mut tx, wallet_id, owner_user_id).await?;

        let hold_model = sqlx::query_as::<_, HoldModel>(
            "SELECT id, wallet_id, amount, status, idempotency_key, reference, details, ledger_entry_id, created_at, updated_at
             FROM wallet_holds WHERE id = $1 AND wallet_id = $2 FOR UPDATE",
        )
        .bind(hold_id)
        .bind(wallet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WalletError::HoldNotFound)?;

        match hold_model.status {
            HoldStatus::Captured => {
                tx.commit().await?;
                return Ok(hold_model.into());
            }
            HoldStatus::Released => {
                return Err(WalletError::IllegalTransition(
                    "hold already released, cannot capture".into(),
                ))
            }
            HoldStatus::Active => {}
        }

        let updated_hold = sqlx::query_as::<_, HoldModel>(
            "UPDATE wallet_holds SET status = 'captured', updated_at = now() WHERE id = $1
             RETURNING id, wallet_id, amount, status, idempotency_key, reference, details, ledger_entry_id, created_at, updated_at",
        )
        .bind(hold_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated_hold.into())
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
        let mut tx = self.pool.begin().await?;

        if let Some(existing) = sqlx::query_as::<_, TransferModel>(
            "SELECT id, user_id, source_wallet_id, target_wallet_id, amount, currency, status, idempotency_key,
                    debit_entry_id, credit_entry_id, failure_reason, external_reference, created_at, updated_at
             FROM wallet_transfers WHERE idempotency_key = $1",
        )
        .bind(&idempotency_key)
        .fetch_optional(&mut *tx)
        .await?
        {
            let source_wallet = fetch_wallet_plain(&mut tx, existing.source_wallet_id).await?;
            let target_wallet = fetch_wallet_plain(&mut tx, existing.target_wallet_id).await?;
            tx.commit().await?;
            return Ok(TransferOutcome {
                transfer: existing.into(),
                source_wallet: source_wallet.try_into()?,
                target_wallet: target_wallet.try_into()?,
            });
        }

        // Ascending-id lock order prevents deadlock cycles across concurrent
        // transfers touching the same pair of wallets in opposite directions.
        let (first_id, second_id) = if source_wallet_id.0 < target_wallet_id.0 {
            (source_wallet_id, target_wallet_id)
        } else {
            (target_wallet_id, source_wallet_id)
        };
        let first_model = lock_wallet_by_id(&mut tx, first_id).await?;
        let second_model = lock_wallet_by_id(&mut tx, second_id).await?;
        let (source_model, target_model) = if first_id == source_wallet_id {
            (first_model, second_model)
        } else {
            (second_model, first_model)
        };

        if source_model.owner_user_id != user_id || target_model.owner_user_id != user_id {
            return Err(WalletError::Forbidden);
        }
        if source_model.currency != currency || target_model.currency != currency {
            return Err(WalletError::InvalidData(
                "source, target and transfer currency must all match".into(),
            ));
        }

        let transfer_row = sqlx::query_as::<_, TransferModel>(
            "INSERT INTO wallet_transfers (user_id, source_wallet_id, target_wallet_id, amount, currency, status,
                                     idempotency_key, external_reference, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, now(), now())
             RETURNING id, user_id, source_wallet_id, target_wallet_id, amount, currency, status, idempotency_key,
                       debit_entry_id, credit_entry_id, failure_reason, external_reference, created_at, updated_at",
        )
        .bind(user_id)
        .bind(source_wallet_id)
        .bind(target_wallet_id)
        .bind(amount)
        .bind(&currency)
        .bind(&idempotency_key)
        .bind(&external_reference)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO wallet_outbox_events (event_type, payload, created_at) VALUES ($1, $2, now())")
            .bind("wallet.transfer.created")
            .bind(json!({
                "transfer_id": transfer_row.id.0,
                "source_wallet_id": source_wallet_id.0,
                "target_wallet_id": target_wallet_id.0,
                "amount": amount,
                "currency": currency,
            }))
            .execute(&mut *tx)
            .await?;

        let transfer_details = json!({
            "reason": "transfer",
            "transfer_id": transfer_row.id.0,
            "description": description,
        });

        if source_model.balance < amount {
            let failed = sqlx::query_as::<_, TransferModel>(
                "UPDATE wallet_transfers SET status = 'failed', failure_reason = $1, updated_at = now() WHERE id = $2
                 RETURNING id, user_id, source_wallet_id, target_wallet_id, amount, currency, status, idempotency_key,
                           debit_entry_id, credit_entry_id, failure_reason, external_reference, created_at, updated_at",
            )
            .bind("insufficient funds")
            .bind(transfer_row.id)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("INSERT INTO wallet_outbox_events (event_type, payload, created_at) VALUES ($1, $2, now())")
                .bind("wallet.transfer.failed")
                .bind(json!({"transfer_id": failed.id.0, "reason": "insufficient_funds"}))
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            return Err(WalletError::InsufficientFunds(source_wallet_id));
        }

        let debit_key = format!("wallet-transfer-debit-{}", transfer_row.id);
        let credit_key = format!("wallet-transfer-credit-{}", transfer_row.id);

        let new_source_balance = source_model.balance - amount;
        let new_target_balance = target_model.balance + amount;

        let updated_source = sqlx::query_as::<_, WalletModel>(
            "UPDATE wallets SET balance = $1, updated_at = now() WHERE id = $2
             RETURNING id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at",
        )
        .bind(new_source_balance)
        .bind(source_wallet_id)
        .fetch_one(&mut *tx)
        .await?;

        let updated_target = sqlx::query_as::<_, WalletModel>(
            "UPDATE wallets SET balance = $1, updated_at = now() WHERE id = $2
             RETURNING id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at",
        )
        .bind(new_target_balance)
        .bind(target_wallet_id)
        .fetch_one(&mut *tx)
        .await?;

        let debit_entry = sqlx::query_as::<_, LedgerEntryModel>(
            "INSERT INTO ledger_entries (wallet_id, entry_type, amount, idempotency_key, details, created_at)
             VALUES ($1, 'debit', $2, $3, $4, now())
             RETURNING id, wallet_id, entry_type, amount, idempotency_key, details, created_at",
        )
        .bind(source_wallet_id)
        .bind(amount)
        .bind(&debit_key)
        .bind(&transfer_details)
        .fetch_one(&mut *tx)
        .await?;

        let credit_entry = sqlx::query_as::<_, LedgerEntryModel>(
            "INSERT INTO ledger_entries (wallet_id, entry_type, amount, idempotency_key, details, created_at)
             VALUES ($1, 'credit', $2, $3, $4, now())
             RETURNING id, wallet_id, entry_type, amount, idempotency_key, details, created_at",
        )
        .bind(target_wallet_id)
        .bind(amount)
        .bind(&credit_key)
        .bind(&transfer_details)
        .fetch_one(&mut *tx)
        .await?;

        let completed = sqlx::query_as::<_, TransferModel>(
            "UPDATE wallet_transfers SET status = 'completed', debit_entry_id = $1, credit_entry_id = $2, updated_at = now()
             WHERE id = $3
             RETURNING id, user_id, source_wallet_id, target_wallet_id, amount, currency, status, idempotency_key,
                       debit_entry_id, credit_entry_id, failure_reason, external_reference, created_at, updated_at",
        )
        .bind(debit_entry.id)
        .bind(credit_entry.id)
        .bind(transfer_row.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO wallet_outbox_events (event_type, payload, created_at) VALUES ($1, $2, now())")
            .bind("wallet.transfer.completed")
            .bind(json!({"transfer_id": completed.id.0}))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(TransferOutcome {
            transfer: completed.into(),
            source_wallet: updated_source.try_into()?,
            target_wallet: updated_target.try_into()?,
        })
    }

    async fn list_statement(
        &self,
        wallet_id: WalletId,
        owner_user_id: UserId,
        limit: i64,
        cursor: Option<i64>,
    ) -> Result<(Vec<LedgerEntry>, Option<i64>), WalletError> {
        let owned = sqlx::query_scalar::<_, i64>("SELECT id FROM wallets WHERE id = $1 AND owner_user_id = $2")
            .bind(wallet_id)
            .bind(owner_user_id)
            .fetch_optional(&self.pool)
            .await?;
        if owned.is_none() {
            return Err(WalletError::NotFound(wallet_id));
        }

        let rows = match cursor {
            Some(last_seen_id) => {
                sqlx::query_as::<_, LedgerEntryModel>(
                    "SELECT id, wallet_id, entry_type, amount, idempotency_key, details, created_at
                     FROM ledger_entries WHERE wallet_id = $1 AND id < $2 ORDER BY id DESC LIMIT $3",
                )
                .bind(wallet_id)
                .bind(last_seen_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, LedgerEntryModel>(
                    "SELECT id, wallet_id, entry_type, amount, idempotency_key, details, created_at
                     FROM ledger_entries WHERE wallet_id = $1 ORDER BY id DESC LIMIT $2",
                )
                .bind(wallet_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let last_id = rows.last().map(|row| row.id.0);
        Ok((rows.into_iter().map(Into::into).collect(), last_id))
    }

    async fn reconcile(&self, wallet_id: WalletId, owner_user_id: UserId) -> Result<Reconciliation, WalletError> {
        let wallet_model = sqlx::query_as::<_, WalletModel>(
            "SELECT id, owner_user_id, currency, status, balance, allow_additional, created_at, updated_at
             FROM wallets WHERE id = $1 AND owner_user_id = $2",
        )
        .bind(wallet_id)
        .bind(owner_user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(WalletError::NotFound(wallet_id))?;

        let (credit_sum, debit_sum, entry_count): (Decimal, Decimal, i64) = sqlx::query_as(
            "SELECT
                COALESCE(SUM(amount) FILTER (WHERE entry_type = 'credit'), 0) AS credit_sum,
                COALESCE(SUM(amount) FILTER (WHERE entry_type = 'debit'), 0) AS debit_sum,
                COUNT(*) AS entry_count
             FROM ledger_entries WHERE wallet_id = $1",
        )
        .bind(wallet_id)
        .fetch_one(&self.pool)
        .await?;

        let ledger_balance = credit_sum - debit_sum;
        let delta = wallet_model.balance - ledger_balance;
        let status = if delta == Decimal::ZERO {
            ReconciliationStatus::Balanced
        } else {
            ReconciliationStatus::DriftDetected
        };

        Ok(Reconciliation {
            wallet_id,
            stored_balance: wallet_model.balance,
            ledger_balance,
            delta,
            entry_count,
            status,
        })
    }
}
