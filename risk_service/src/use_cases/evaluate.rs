use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::engine::RiskEngine;
use crate::domain::entities::{EvaluationContext, RiskEvaluation};
use crate::domain::error::RiskError;
use crate::domain::repository::EvaluationStore;

/// spec.md §4.3 `POST /evaluations`: runs the rule engine over the request
/// and persists the outcome.
pub struct EvaluateUseCase {
    engine: Arc<RiskEngine>,
    store: Arc<dyn EvaluationStore>,
}

impl EvaluateUseCase {
    pub fn new(engine: Arc<RiskEngine>, store: Arc<dyn EvaluationStore>) -> Self {
        Self { engine, store }
    }

    #[tracing::instrument(skip(self, ctx))]
    pub async fn execute(&self, ctx: EvaluationContext) -> Result<RiskEvaluation, RiskError> {
        if ctx.amount <= rust_decimal::Decimal::ZERO {
            return Err(RiskError::InvalidData("amount must be positive".to_string()));
        }
        if ctx.currency.len() != 3 {
            return Err(RiskError::InvalidData("currency must be a 3-letter code".to_string()));
        }

        let result = self.engine.evaluate(&ctx);

        let evaluation = RiskEvaluation {
            id: Uuid::new_v4(),
            event_type: ctx.event_type,
            subject_id: ctx.subject_id,
            decision: result.decision,
            risk_score: result.risk_score,
            triggered_rules: result.triggered_rules,
            created_at: Utc::now(),
        };

        self.store.save(evaluation).await
    }
}
