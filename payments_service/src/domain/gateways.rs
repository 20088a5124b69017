//! Port the orchestrator calls into the Wallet Ledger Core through (spec.md
//! §4.4 steps 3/4/5). Grounded on the teacher's `WalletGateway` trait
//! (`transaction_service/src/domain/gateways.rs`), generalized from a single
//! `process_movement` call to the three hold operations this spec needs, and
//! switched from `tonic::async_trait` to the ordinary `async_trait` crate
//! since the wire is HTTP/JSON (spec.md §9b).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::error::PaymentError;
use crate::domain::types::{HoldId, WalletId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteHoldStatus {
    Active,
    Captured,
    Released,
}

#[derive(Debug, Clone)]
pub struct RemoteHold {
    pub id: HoldId,
    pub status: RemoteHoldStatus,
}

#[async_trait]
pub trait WalletGateway: Send + Sync {
    async fn create_hold(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        idempotency_key: String,
        authorization: &str,
    ) -> Result<RemoteHold, PaymentError>;

    async fn capture_hold(
        &self,
        wallet_id: WalletId,
        hold_id: HoldId,
        idempotency_key: String,
        authorization: &str,
    ) -> Result<RemoteHold, PaymentError>;

    async fn release_hold(
        &self,
        wallet_id: WalletId,
        hold_id: HoldId,
        idempotency_key: String,
        authorization: &str,
    ) -> Result<RemoteHold, PaymentError>;
}
