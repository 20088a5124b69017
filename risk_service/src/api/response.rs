use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{EvaluationContext, RiskDecision, RiskEvaluation, TriggeredRule};

/// Wire shape for `POST /evaluations`, matching
/// `common::risk_client::RiskEvaluationRequest` field-for-field — the two
/// types stay separate because this one needs `Deserialize` and the
/// client's needs `Serialize`.
#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    pub event_type: String,
    pub subject_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl From<EvaluationRequest> for EvaluationContext {
    fn from(request: EvaluationRequest) -> Self {
        Self {
            event_type: request.event_type,
            subject_id: request.subject_id,
            user_id: request.user_id,
            amount: request.amount,
            currency: request.currency,
            metadata: request.metadata,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TriggeredRuleView {
    pub rule_id: i64,
    pub name: String,
    pub action: RiskDecision,
    pub reason: String,
    pub weight: f64,
}

impl From<&TriggeredRule> for TriggeredRuleView {
    fn from(rule: &TriggeredRule) -> Self {
        Self {
            rule_id: rule.rule_id,
            name: rule.name.clone(),
            action: rule.action,
            reason: rule.reason.clone(),
            weight: rule.weight,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub id: Uuid,
    pub decision: RiskDecision,
    pub risk_score: f64,
    pub triggered_rules: Vec<TriggeredRuleView>,
    pub created_at: DateTime<Utc>,
}

impl From<RiskEvaluation> for EvaluationResponse {
    fn from(evaluation: RiskEvaluation) -> Self {
        Self {
            id: evaluation.id,
            decision: evaluation.decision,
            risk_score: evaluation.risk_score,
            triggered_rules: evaluation.triggered_rules.iter().map(TriggeredRuleView::from).collect(),
            created_at: evaluation.created_at,
        }
    }
}
