//! HTTP surface for the Wallet Ledger Core (spec.md §6). `AppState` bundles
//! the use cases and the token validator; handlers extract [`AuthContext`]
//! and delegate straight to a use case, mapping its `Result` onto a status
//! code and a [`ApiError`] on failure.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use token_validator::{AuthContext, ProvidesTokenValidator, Scope, TokenValidator};

use crate::domain::entities::EntryType;
use crate::domain::types::{HoldId, WalletId};
use crate::use_cases::apply_entry::ApplyEntryUseCase;
use crate::use_cases::create_wallet::CreateWalletUseCase;
use crate::use_cases::get_balance::GetBalanceUseCase;
use crate::use_cases::hold_capture::HoldCaptureUseCase;
use crate::use_cases::hold_create::HoldCreateUseCase;
use crate::use_cases::hold_release::HoldReleaseUseCase;
use crate::use_cases::list_statement::ListStatementUseCase;
use crate::use_cases::reconcile::ReconcileUseCase;
use crate::use_cases::transfer::TransferUseCase;

use super::error::ApiError;
use super::response::{
    ApplyEntryRequest, BalanceView, CreateHoldRequest, CreateWalletRequest, HoldView,
    ReleaseHoldRequest, StatementQuery, StatementView, TransferOutcomeView, TransferRequest,
    WalletView,
};

const ALLOWED_SCOPES: &[Scope] = &[Scope::Access, Scope::WalletAccess];

#[derive(Clone)]
pub struct AppState {
    pub create_wallet: Arc<CreateWalletUseCase>,
    pub get_balance: Arc<GetBalanceUseCase>,
    pub apply_entry: Arc<ApplyEntryUseCase>,
    pub hold_create: Arc<HoldCreateUseCase>,
    pub hold_release: Arc<HoldReleaseUseCase>,
    pub hold_capture: Arc<HoldCaptureUseCase>,
    pub transfer: Arc<TransferUseCase>,
    pub list_statement: Arc<ListStatementUseCase>,
    pub reconcile: Arc<ReconcileUseCase>,
    pub token_validator: Arc<TokenValidator>,
}

impl ProvidesTokenValidator for AppState {
    fn token_validator(&self) -> &Arc<TokenValidator> {
        &self.token_validator
    }

    fn allowed_scopes(&self) -> &'static [Scope] {
        ALLOWED_SCOPES
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(create_wallet))
        .route("/{id}/balance", get(get_balance))
        .route("/{id}/credit", post(credit))
        .route("/{id}/debit", post(debit))
        .route("/{id}/transfers", post(transfer))
        .route("/{id}/holds", post(create_hold))
        .route("/{id}/holds/{hold_id}/release", post(release_hold))
        .route("/{id}/holds/{hold_id}/capture", post(capture_hold))
        .route("/{id}/statements", get(list_statement))
        .route("/{id}/reconciliation", get(reconciliation))
        .with_state(state)
}

async fn create_wallet(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<CreateWalletRequest>,
) -> Result<Response, ApiError> {
    let (wallet, created) = state
        .create_wallet
        .execute(auth.user_id, body.currency, body.allow_additional)
        .await?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(WalletView::from(&wallet))).into_response())
}

async fn get_balance(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(wallet_id): Path<i64>,
) -> Result<Json<BalanceView>, ApiError> {
    let wallet = state
        .get_balance
        .execute(WalletId(wallet_id), auth.user_id)
        .await?;
    Ok(Json(BalanceView::from(&wallet)))
}

async fn credit(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(wallet_id): Path<i64>,
    Json(body): Json<ApplyEntryRequest>,
) -> Result<Json<WalletView>, ApiError> {
    apply_entry(state, auth, wallet_id, EntryType::Credit, body).await
}

async fn debit(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(wallet_id): Path<i64>,
    Json(body): Json<ApplyEntryRequest>,
) -> Result<Json<WalletView>, ApiError> {
    apply_entry(state, auth, wallet_id, EntryType::Debit, body).await
}

async fn apply_entry(
    state: AppState,
    auth: AuthContext,
    wallet_id: i64,
    entry_type: EntryType,
    body: ApplyEntryRequest,
) -> Result<Json<WalletView>, ApiError> {
    let (wallet, _entry, _replayed) = state
        .apply_entry
        .execute(
            WalletId(wallet_id),
            auth.user_id,
            entry_type,
            body.amount,
            body.idempotency_key,
            body.details.unwrap_or_else(|| json!({})),
        )
        .await?;
    Ok(Json(WalletView::from(&wallet)))
}

async fn transfer(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(wallet_id): Path<i64>,
    Json(body): Json<TransferRequest>,
) -> Result<Response, ApiError> {
    let outcome = state
        .transfer
        .execute(
            auth.user_id,
            WalletId(wallet_id),
            body.target_wallet_id,
            body.amount,
            body.currency,
            body.idempotency_key,
            body.description,
            body.external_reference,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(TransferOutcomeView::from(&outcome))).into_response())
}

async fn create_hold(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(wallet_id): Path<i64>,
    Json(body): Json<CreateHoldRequest>,
) -> Result<Response, ApiError> {
    let (hold, created) = state
        .hold_create
        .execute(
            WalletId(wallet_id),
            auth.user_id,
            body.amount,
            body.idempotency_key,
            body.reference,
            body.details.unwrap_or_else(|| json!({})),
        )
        .await?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(HoldView::from(&hold))).into_response())
}

async fn release_hold(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((wallet_id, hold_id)): Path<(i64, i64)>,
    body: Option<Json<ReleaseHoldRequest>>,
) -> Result<Json<HoldView>, ApiError> {
    let _ = body.unwrap_or_default();
    let hold = state
        .hold_release
        .execute(WalletId(wallet_id), auth.user_id, HoldId(hold_id))
        .await?;
    Ok(Json(HoldView::from(&hold)))
}

async fn capture_hold(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((wallet_id, hold_id)): Path<(i64, i64)>,
) -> Result<Json<HoldView>, ApiError> {
    let hold = state
        .hold_capture
        .execute(WalletId(wallet_id), auth.user_id, HoldId(hold_id))
        .await?;
    Ok(Json(HoldView::from(&hold)))
}

async fn list_statement(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(wallet_id): Path<i64>,
    Query(query): Query<StatementQuery>,
) -> Result<Json<StatementView>, ApiError> {
    let cursor = common::pagination::parse_cursor(query.cursor.as_deref())
        .map_err(|err| ApiError::from(crate::domain::error::WalletError::InvalidData(err.to_string())))?;

    let (entries, next_cursor) = state
        .list_statement
        .execute(WalletId(wallet_id), auth.user_id, query.limit, cursor)
        .await?;

    Ok(Json(StatementView {
        wallet_id: WalletId(wallet_id),
        entries: entries.iter().map(Into::into).collect(),
        next_cursor,
    }))
}

async fn reconciliation(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(wallet_id): Path<i64>,
) -> Result<Json<super::response::ReconciliationView>, ApiError> {
    let result = state
        .reconcile
        .execute(WalletId(wallet_id), auth.user_id)
        .await?;
    Ok(Json((&result).into()))
}
