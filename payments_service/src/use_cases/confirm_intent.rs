use std::collections::BTreeMap;
use std::sync::Arc;

use common::risk_client::{RiskClient, RiskClientError, RiskDecision, RiskEvaluationRequest};

use crate::domain::entities::{PaymentIntent, PaymentIntentStatus};
use crate::domain::error::PaymentError;
use crate::domain::gateways::{RemoteHoldStatus, WalletGateway};
use crate::domain::repository::PaymentIntentRepository;
use crate::domain::types::{PaymentIntentId, UserId};

/// Client-provided risk-relevant headers, copied verbatim into the Risk
/// request's metadata (spec.md §4.4 confirm step 2).
#[derive(Debug, Default, Clone)]
pub struct RiskContext {
    pub ip_country: Option<String>,
    pub user_country: Option<String>,
    pub email_domain: Option<String>,
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
}

impl RiskContext {
    fn into_metadata(self) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        if let Some(v) = self.ip_country {
            metadata.insert("ip_country".to_string(), v);
        }
        if let Some(v) = self.user_country {
            metadata.insert("user_country".to_string(), v);
        }
        if let Some(v) = self.email_domain {
            metadata.insert("email_domain".to_string(), v);
        }
        if let Some(v) = self.user_agent {
            metadata.insert("user_agent".to_string(), v);
        }
        if let Some(v) = self.client_ip {
            metadata.insert("client_ip".to_string(), v);
        }
        metadata
    }
}

/// spec.md §4.4 confirm algorithm: risk check, then ensure-hold, then
/// capture-hold, each step idempotent on replay so a crash at any point is
/// safely resumed by the next `confirm`.
pub struct ConfirmIntentUseCase {
    repo: Arc<dyn PaymentIntentRepository>,
    wallet_gateway: Arc<dyn WalletGateway>,
    risk_client: Arc<dyn RiskClient>,
}

impl ConfirmIntentUseCase {
    pub fn new(
        repo: Arc<dyn PaymentIntentRepository>,
        wallet_gateway: Arc<dyn WalletGateway>,
        risk_client: Arc<dyn RiskClient>,
    ) -> Self {
        Self {
            repo,
            wallet_gateway,
            risk_client,
        }
    }

    #[tracing::instrument(skip(self, authorization, risk_context))]
    pub async fn execute(
        &self,
        id: PaymentIntentId,
        user_id: UserId,
        authorization: &str,
        risk_context: RiskContext,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut intent = self.repo.find(id, user_id).await?;

        if intent.status() != PaymentIntentStatus::Pending {
            return Ok(intent);
        }

        let risk_key = format!("pi-risk-{id}");
        let risk_request = RiskEvaluationRequest {
            event_type: "payment_intent".to_string(),
            subject_id: id.to_string(),
            user_id: user_id.to_string(),
            amount: intent.amount(),
            currency: intent.currency().to_string(),
            metadata: risk_context.into_metadata(),
        };

        match self.risk_client.evaluate(&risk_key, risk_request).await {
            Ok(response) => match response.decision {
                RiskDecision::Approve => {}
                RiskDecision::Decline => {
                    intent.set_status(PaymentIntentStatus::Declined);
                    return self.repo.update(&intent).await;
                }
                RiskDecision::Review => {
                    intent.set_status(PaymentIntentStatus::Review);
                    return self.repo.update(&intent).await;
                }
            },
            Err(RiskClientError::Timeout) => return Err(PaymentError::RiskTimeout),
            Err(RiskClientError::Unavailable(reason)) | Err(RiskClientError::EvaluationFailed(reason)) => {
                return Err(PaymentError::RiskUnavailable(reason));
            }
        }

        if intent.hold_id().is_none() {
            let idempotency_key = format!("pi-hold-{id}");
            let hold = self
                .wallet_gateway
                .create_hold(intent.wallet_id(), intent.amount(), idempotency_key, authorization)
                .await?;
            intent.set_hold_id(hold.id);
            intent = self.repo.update(&intent).await?;
        }

        let hold_id = intent.hold_id().expect("hold_id set above");
        let capture_key = format!("pi-hold-capture-{id}");
        let captured = self
            .wallet_gateway
            .capture_hold(intent.wallet_id(), hold_id, capture_key, authorization)
            .await?;

        if !matches!(captured.status, RemoteHoldStatus::Captured | RemoteHoldStatus::Released) {
            return Err(PaymentError::WalletCallFailed {
                op: "hold.capture",
                reason: "unexpected hold status after capture".to_string(),
            });
        }

        intent.set_status(PaymentIntentStatus::Confirmed);
        self.repo.update(&intent).await
    }
}
