//! HTTP surface for the Risk Evaluator (spec.md §4.3): `POST /evaluations`,
//! called service-to-service by `wallet_service` and `payments_service`
//! through `common::risk_client::HttpRiskClient`. That client posts to
//! `{base_url}/evaluations` with no path prefix and no bearer token, so
//! unlike `wallet_service`/`payments_service` this router carries no
//! `AuthContext`/`TokenValidator` — it trusts its callers on the network
//! boundary the same way the Wallet Ledger Core's outbound risk call does.
//! `GET /evaluations/:id` is a read-back of a past result (SPEC_FULL.md
//! §4.3's supplemental addition, not mandated by spec.md).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::use_cases::evaluate::EvaluateUseCase;
use crate::use_cases::get_evaluation::GetEvaluationUseCase;

use super::error::ApiError;
use super::response::{EvaluationRequest, EvaluationResponse};

#[derive(Clone)]
pub struct AppState {
    pub evaluate: Arc<EvaluateUseCase>,
    pub get_evaluation: Arc<GetEvaluationUseCase>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/evaluations", post(create_evaluation))
        .route("/evaluations/{id}", get(get_evaluation))
        .with_state(state)
}

async fn create_evaluation(
    State(state): State<AppState>,
    Json(body): Json<EvaluationRequest>,
) -> Result<Response, ApiError> {
    let evaluation = state.evaluate.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(EvaluationResponse::from(evaluation))).into_response())
}

async fn get_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvaluationResponse>, ApiError> {
    let evaluation = state.get_evaluation.execute(id).await?;
    Ok(Json(EvaluationResponse::from(evaluation)))
}
