//! HTTP surface for the Payment Intent Orchestrator (spec.md §6). Mirrors
//! `wallet_service::api::http_routes`'s `AppState`/`AuthContext` wiring;
//! restricted to `Scope::Access` only (spec.md §4.1 — no wallet-access scope
//! here).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use token_validator::{AuthContext, ProvidesTokenValidator, Scope, TokenValidator};

use crate::domain::entities::PaymentIntentStatus;
use crate::domain::types::PaymentIntentId;
use crate::use_cases::cancel_intent::CancelIntentUseCase;
use crate::use_cases::confirm_intent::{ConfirmIntentUseCase, RiskContext};
use crate::use_cases::create_intent::CreateIntentUseCase;
use crate::use_cases::get_intent::GetIntentUseCase;

use super::error::ApiError;
use super::response::{CreateIntentRequest, PaymentIntentView};

const ALLOWED_SCOPES: &[Scope] = &[Scope::Access];

#[derive(Clone)]
pub struct AppState {
    pub create_intent: Arc<CreateIntentUseCase>,
    pub get_intent: Arc<GetIntentUseCase>,
    pub confirm_intent: Arc<ConfirmIntentUseCase>,
    pub cancel_intent: Arc<CancelIntentUseCase>,
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
        .route("/", post(create_intent))
        .route("/{id}", get(get_intent))
        .route("/{id}/confirm", post(confirm_intent))
        .route("/{id}/cancel", post(cancel_intent))
        .with_state(state)
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name)?.to_str().ok().map(str::to_string)
}

fn risk_context_from_headers(headers: &HeaderMap) -> RiskContext {
    RiskContext {
        ip_country: header_str(headers, "x-ip-country"),
        user_country: header_str(headers, "x-user-country"),
        email_domain: header_str(headers, "x-email-domain"),
        user_agent: header_str(headers, "user-agent"),
        client_ip: header_str(headers, "x-forwarded-for"),
    }
}

fn authorization_header(headers: &HeaderMap) -> String {
    header_str(headers, "authorization").unwrap_or_default()
}

async fn create_intent(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<CreateIntentRequest>,
) -> Result<Response, ApiError> {
    let intent = state
        .create_intent
        .execute(auth.user_id, body.wallet_id, body.amount, body.currency)
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentIntentView::from(&intent))).into_response())
}

async fn get_intent(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<PaymentIntentView>, ApiError> {
    let intent = state.get_intent.execute(PaymentIntentId(id), auth.user_id).await?;
    Ok(Json(PaymentIntentView::from(&intent)))
}

/// spec.md §6: 200 confirmed, 403 declined, 409 review (or any other
/// non-confirmed terminal status reached via an idempotent replay).
async fn confirm_intent(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let authorization = authorization_header(&headers);
    let risk_context = risk_context_from_headers(&headers);
    let intent = state
        .confirm_intent
        .execute(PaymentIntentId(id), auth.user_id, &authorization, risk_context)
        .await?;

    let status = match intent.status() {
        PaymentIntentStatus::Confirmed | PaymentIntentStatus::Pending => StatusCode::OK,
        PaymentIntentStatus::Declined => StatusCode::FORBIDDEN,
        PaymentIntentStatus::Review | PaymentIntentStatus::Canceled => StatusCode::CONFLICT,
    };
    Ok((status, Json(PaymentIntentView::from(&intent))).into_response())
}

async fn cancel_intent(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<PaymentIntentView>, ApiError> {
    let authorization = authorization_header(&headers);
    let intent = state
        .cancel_intent
        .execute(PaymentIntentId(id), auth.user_id, &authorization)
        .await?;
    Ok(Json(PaymentIntentView::from(&intent)))
}
