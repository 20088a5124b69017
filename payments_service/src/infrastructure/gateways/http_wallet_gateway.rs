//! HTTP client for the Wallet Ledger Core's hold operations (spec.md §4.4
//! steps 3/4 and "Wallet call retries"). Grounded on
//! `transaction_service::infrastructure::gateways::grpc_wallet_gateway`'s
//! shape, swapped from a single gRPC `process_movement` call to three HTTP
//! calls against `wallet_service`'s `/api/v1/wallets/{id}/holds...` surface,
//! and wrapped in `common::retry::retry_linear` per spec.md's retry rule.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use common::retry::{retry_linear, Retry, RetryPolicy};

use crate::domain::error::PaymentError;
use crate::domain::gateways::{RemoteHold, RemoteHoldStatus, WalletGateway};
use crate::domain::types::{HoldId, WalletId};

#[derive(Debug, Deserialize)]
struct WalletHoldResponse {
    id: i64,
    status: String,
}

impl WalletHoldResponse {
    fn into_remote_hold(self) -> Result<RemoteHold, String> {
        let status = match self.status.as_str() {
            "active" => RemoteHoldStatus::Active,
            "captured" => RemoteHoldStatus::Captured,
            "released" => RemoteHoldStatus::Released,
            other => return Err(format!("unrecognized hold status {other:?}")),
        };
        Ok(RemoteHold {
            id: HoldId(self.id),
            status,
        })
    }
}

#[derive(Debug, Serialize)]
struct CreateHoldBody {
    amount: Decimal,
    idempotency_key: String,
}

pub struct HttpWalletGateway {
    http: Client,
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl HttpWalletGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration, retry_policy: RetryPolicy) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            timeout,
            retry_policy,
        }
    }

    async fn call(
        &self,
        op: &'static str,
        idempotency_key: &str,
        authorization: &str,
        method_path: String,
        body: Option<serde_json::Value>,
    ) -> Result<RemoteHold, PaymentError> {
        retry_linear(self.retry_policy, |_attempt| {
            let body = body.clone();
            let url = format!("{}{}", self.base_url.trim_end_matches('/'), method_path);
            async move {
                let mut request = self
                    .http
                    .post(&url)
                    .timeout(self.timeout)
                    .header("Idempotency-Key", idempotency_key)
                    .header("Authorization", authorization);
                if let Some(body) = body {
                    request = request.json(&body);
                } else {
                    request = request.json(&json!({}));
                }

                let response = match request.send().await {
                    Ok(response) => response,
                    Err(err) if err.is_timeout() => {
                        return Err(Retry::Retryable(PaymentError::WalletCallFailed {
                            op,
                            reason: "timed out".to_string(),
                        }))
                    }
                    Err(err) => {
                        return Err(Retry::Retryable(PaymentError::WalletCallFailed {
                            op,
                            reason: err.to_string(),
                        }))
                    }
                };

                let status = response.status();
                if status.is_server_error() {
                    return Err(Retry::Retryable(PaymentError::WalletCallFailed {
                        op,
                        reason: format!("wallet service returned {status}"),
                    }));
                }
                if status == StatusCode::REQUEST_TIMEOUT {
                    return Err(Retry::Retryable(PaymentError::WalletCallFailed {
                        op,
                        reason: "wallet service returned 408".to_string(),
                    }));
                }
                if status.is_client_error() {
                    let reason = response
                        .text()
                        .await
                        .unwrap_or_else(|_| format!("wallet service returned {status}"));
                    return Err(Retry::Fatal(PaymentError::WalletCallFailed { op, reason }));
                }

                let parsed = response
                    .json::<WalletHoldResponse>()
                    .await
                    .map_err(|err| {
                        Retry::Retryable(PaymentError::WalletCallFailed {
                            op,
                            reason: err.to_string(),
                        })
                    })?;

                parsed.into_remote_hold().map_err(|reason| Retry::Fatal(PaymentError::WalletCallFailed { op, reason }))
            }
        })
        .await
    }
}

#[async_trait]
impl WalletGateway for HttpWalletGateway {
    async fn create_hold(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        idempotency_key: String,
        authorization: &str,
    ) -> Result<RemoteHold, PaymentError> {
        let body = serde_json::to_value(CreateHoldBody {
            amount,
            idempotency_key: idempotency_key.clone(),
        })
        .expect("CreateHoldBody is always serializable");
        self.call(
            "hold.create",
            &idempotency_key,
            authorization,
            format!("/{wallet_id}/holds"),
            Some(body),
        )
        .await
    }

    async fn capture_hold(
        &self,
        wallet_id: WalletId,
        hold_id: HoldId,
        idempotency_key: String,
        authorization: &str,
    ) -> Result<RemoteHold, PaymentError> {
        self.call(
            "hold.capture",
            &idempotency_key,
            authorization,
            format!("/{wallet_id}/holds/{hold_id}/capture"),
            None,
        )
        .await
    }

    async fn release_hold(
        &self,
        wallet_id: WalletId,
        hold_id: HoldId,
        idempotency_key: String,
        authorization: &str,
    ) -> Result<RemoteHold, PaymentError> {
        self.call(
            "hold.release",
            &idempotency_key,
            authorization,
            format!("/{wallet_id}/holds/{hold_id}/release"),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        let response = WalletHoldResponse {
            id: 7,
            status: "captured".to_string(),
        };
        let hold = response.into_remote_hold().unwrap();
        assert_eq!(hold.id, HoldId(7));
        assert_eq!(hold.status, RemoteHoldStatus::Captured);
    }

    #[test]
    fn rejects_unknown_status() {
        let response = WalletHoldResponse {
            id: 7,
            status: "voided".to_string(),
        };
        assert!(response.into_remote_hold().is_err());
    }
}
