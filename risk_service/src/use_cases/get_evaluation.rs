use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::RiskEvaluation;
use crate::domain::error::RiskError;
use crate::domain::repository::EvaluationStore;

/// Read-back of a past evaluation. Not in spec.md's in-scope endpoint list,
/// but grounded directly in `original_source/services/risk_service/app/routes/risk.py`'s
/// `GET /api/v1/risk/evaluations/{id}` and explicitly enabled by SPEC_FULL.md
/// §4.3's in-memory-store note — this is evaluation read-back, not the
/// out-of-scope rule CRUD.
pub struct GetEvaluationUseCase {
    store: Arc<dyn EvaluationStore>,
}

impl GetEvaluationUseCase {
    pub fn new(store: Arc<dyn EvaluationStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: Uuid) -> Result<RiskEvaluation, RiskError> {
        self.store.find(id).await
    }
}
