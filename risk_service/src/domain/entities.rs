//! Rule-engine data model (spec.md §4.3), grounded on
//! `original_source/services/risk_service/app/risk_engine.py`'s
//! `RuleConfig`/`EvaluationContext`/`TriggeredRule`/`EvaluationResult`.
//! Risk rule CRUD is out of scope, so unlike the Python original's
//! DB-backed `RiskRule` row, a rule's type and its type-specific
//! configuration collapse into one enum — there is no freestanding
//! `rule_type` column to keep in sync with `config`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskDecision {
    Approve,
    Review,
    Decline,
}

/// Type-specific configuration for each of the four rule types
/// `risk_engine.py`'s `_evaluate_rule` understands.
#[derive(Debug, Clone)]
pub enum RiskRuleConfig {
    AmountThreshold {
        default: Decimal,
        currency_thresholds: BTreeMap<String, Decimal>,
    },
    CountryMismatch,
    BlocklistCountry {
        blocked_countries: BTreeSet<String>,
    },
    EmailDomainBlock {
        blocked_domains: BTreeSet<String>,
    },
}

/// One configured rule. Loaded once at startup from
/// [`crate::infrastructure::rules::default_rules`]; there is no runtime
/// mutation path (spec.md §4.3 Non-goals exclude rule CRUD).
#[derive(Debug, Clone)]
pub struct RiskRule {
    pub id: i64,
    pub name: String,
    pub event_types: Vec<String>,
    pub action: RiskDecision,
    pub weight: f64,
    pub enabled: bool,
    pub config: RiskRuleConfig,
}

/// The inbound request, after wire decoding. Equivalent to
/// `risk_engine.py`'s `EvaluationContext`.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    pub event_type: String,
    pub subject_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub metadata: BTreeMap<String, String>,
}

/// One rule that fired during an evaluation.
#[derive(Debug, Clone)]
pub struct TriggeredRule {
    pub rule_id: i64,
    pub name: String,
    pub action: RiskDecision,
    pub reason: String,
    pub weight: f64,
}

/// What [`crate::domain::engine::RiskEngine::evaluate`] returns.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub decision: RiskDecision,
    pub risk_score: f64,
    pub triggered_rules: Vec<TriggeredRule>,
}

/// The persisted record, keyed by `id` (spec.md §4.3: "evaluations
/// persisted to an in-memory store keyed by evaluation id").
#[derive(Debug, Clone)]
pub struct RiskEvaluation {
    pub id: Uuid,
    pub event_type: String,
    pub subject_id: String,
    pub decision: RiskDecision,
    pub risk_score: f64,
    pub triggered_rules: Vec<TriggeredRule>,
    pub created_at: DateTime<Utc>,
}
