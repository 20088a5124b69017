//! Client for the Risk Evaluator's single in-scope endpoint (spec.md §4.3).
//! Shared by `wallet_service` (optional risk coupling on raw debit) and
//! `payments_service` (risk call on intent confirm) so the HTTP contract,
//! retry-free timeout/5xx/4xx mapping, and idempotency-key header convention
//! live in one place.
//!
//! Grounded on `original_source/services/payments_service/app/routes/payment_intents.py`'s
//! `_evaluate_risk`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskDecision {
    Approve,
    Review,
    Decline,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskEvaluationRequest {
    pub event_type: String,
    pub subject_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggeredRule {
    pub rule_id: i64,
    pub name: String,
    pub action: RiskDecision,
    pub reason: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskEvaluationResponse {
    pub id: Uuid,
    pub decision: RiskDecision,
    pub risk_score: f64,
    pub triggered_rules: Vec<TriggeredRule>,
    pub created_at: DateTime<Utc>,
}

/// spec.md §4.3: "the orchestrator treats a 5xx as Unavailable, a 4xx as
/// EvaluationFailed, and any unknown decision as Unavailable."
#[derive(Debug, Error)]
pub enum RiskClientError {
    #[error("risk evaluation timed out")]
    Timeout,
    #[error("risk evaluator unavailable: {0}")]
    Unavailable(String),
    #[error("risk evaluation rejected the request: {0}")]
    EvaluationFailed(String),
}

#[async_trait]
pub trait RiskClient: Send + Sync {
    async fn evaluate(
        &self,
        idempotency_key: &str,
        request: RiskEvaluationRequest,
    ) -> Result<RiskEvaluationResponse, RiskClientError>;
}

/// `POST {base_url}/evaluations` with `Idempotency-Key: {idempotency_key}`.
pub struct HttpRiskClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRiskClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl RiskClient for HttpRiskClient {
    async fn evaluate(
        &self,
        idempotency_key: &str,
        request: RiskEvaluationRequest,
    ) -> Result<RiskEvaluationResponse, RiskClientError> {
        let url = format!("{}/evaluations", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .header("Idempotency-Key", idempotency_key)
            .json(&request)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) if err.is_timeout() => return Err(RiskClientError::Timeout),
            Err(err) => return Err(RiskClientError::Unavailable(err.to_string())),
        };

        let status = response.status();
        if status.is_server_error() {
            return Err(RiskClientError::Unavailable(format!(
                "risk evaluator returned {status}"
            )));
        }
        if status.is_client_error() {
            return Err(RiskClientError::EvaluationFailed(format!(
                "risk evaluator returned {status}"
            )));
        }

        response
            .json::<RiskEvaluationResponse>()
            .await
            .map_err(|err| RiskClientError::Unavailable(err.to_string()))
    }
}

/// In-memory stand-in used by unit tests, mirroring the teacher's
/// `FakeWalletGateway`.
pub struct FakeRiskClient {
    pub decision: RiskDecision,
}

#[async_trait]
impl RiskClient for FakeRiskClient {
    async fn evaluate(
        &self,
        _idempotency_key: &str,
        _request: RiskEvaluationRequest,
    ) -> Result<RiskEvaluationResponse, RiskClientError> {
        Ok(RiskEvaluationResponse {
            id: Uuid::new_v4(),
            decision: self.decision,
            risk_score: 0.0,
            triggered_rules: Vec::new(),
            created_at: Utc::now(),
        })
    }
}
