use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::RiskEvaluation;
use crate::domain::error::RiskError;

/// Port for the evaluation store. spec.md §4.3 keeps this in-memory rather
/// than in Postgres, so unlike `payments_service::domain::repository`
/// there is no `sqlx`-backed implementation — only
/// [`crate::infrastructure::store::InMemoryEvaluationStore`].
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    async fn save(&self, evaluation: RiskEvaluation) -> Result<RiskEvaluation, RiskError>;

    async fn find(&self, id: Uuid) -> Result<RiskEvaluation, RiskError>;
}
