use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::RiskEvaluation;
use crate::domain::error::RiskError;
use crate::domain::repository::EvaluationStore;

/// spec.md §4.3: "evaluations persisted to an in-memory store keyed by
/// evaluation id." No eviction — this process's lifetime is the store's.
#[derive(Default)]
pub struct InMemoryEvaluationStore {
    evaluations: Mutex<HashMap<Uuid, RiskEvaluation>>,
}

impl InMemoryEvaluationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EvaluationStore for InMemoryEvaluationStore {
    async fn save(&self, evaluation: RiskEvaluation) -> Result<RiskEvaluation, RiskError> {
        let mut evaluations = self.evaluations.lock().expect("evaluation store mutex poisoned");
        evaluations.insert(evaluation.id, evaluation.clone());
        Ok(evaluation)
    }

    async fn find(&self, id: Uuid) -> Result<RiskEvaluation, RiskError> {
        let evaluations = self.evaluations.lock().expect("evaluation store mutex poisoned");
        evaluations.get(&id).cloned().ok_or(RiskError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::entities::RiskDecision;

    #[tokio::test]
    async fn save_round_trips_an_evaluation() {
        let store = InMemoryEvaluationStore::new();
        let evaluation = RiskEvaluation {
            id: Uuid::new_v4(),
            event_type: "payment_intent".to_string(),
            subject_id: "pi-1".to_string(),
            decision: RiskDecision::Approve,
            risk_score: 0.0,
            triggered_rules: Vec::new(),
            created_at: Utc::now(),
        };
        let saved = store.save(evaluation.clone()).await.unwrap();
        assert_eq!(saved.id, evaluation.id);
    }
}
