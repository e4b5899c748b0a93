//! Local stand-in for the backend used in demo mode.
//!
//! Answers every endpoint with the same response shapes as the live
//! backend and never fails. Payments and uploads sleep first so the UI
//! behaves as it would against a real network.

use std::time::Duration;

use async_trait::async_trait;

use fraudshield_core::auth::{Acknowledgement, LoginRequest, RegisterRequest, ResetPasswordRequest};
use fraudshield_core::oracle;
use fraudshield_core::session::UserSession;
use fraudshield_core::stats::StatsSnapshot;
use fraudshield_core::transaction::{TransactionRequest, TransactionResult};
use fraudshield_core::types::{Mode, Money};
use fraudshield_core::upload::UploadReport;

use super::TransactionBackend;
use crate::gateway::{GatewayError, UploadFile};

/// Artificial latency applied by the simulated backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub pay_delay: Duration,
    pub upload_delay: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pay_delay: Duration::from_millis(1000),
            upload_delay: Duration::from_millis(1500),
        }
    }
}

impl SimulationConfig {
    /// No artificial latency at all.
    pub fn instant() -> Self {
        Self {
            pay_delay: Duration::ZERO,
            upload_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    config: SimulationConfig,
}

impl SimulatedBackend {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl TransactionBackend for SimulatedBackend {
    fn mode(&self) -> Mode {
        Mode::Demo
    }

    async fn is_reachable(&self) -> bool {
        true
    }

    async fn login(&self, request: &LoginRequest) -> Result<UserSession, GatewayError> {
        Ok(oracle::demo_session(&request.username))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Acknowledgement, GatewayError> {
        tracing::debug!(username = %request.username, "Simulated registration");
        Ok(Acknowledgement {
            status: Some("success".to_string()),
            message: Some("Account created in Mock Mode.".to_string()),
        })
    }

    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<Acknowledgement, GatewayError> {
        tracing::debug!(username = %request.username, "Simulated password reset");
        Ok(Acknowledgement {
            status: Some("success".to_string()),
            message: Some("Password updated in Mock Mode.".to_string()),
        })
    }

    async fn pay(
        &self,
        request: &TransactionRequest,
        balance: Money,
    ) -> Result<TransactionResult, GatewayError> {
        Self::pause(self.config.pay_delay).await;
        let result = oracle::assess(request, balance, &mut rand::rng());
        if result.new_balance < 0.0 {
            tracing::warn!(
                username = %request.username,
                new_balance = result.new_balance,
                "Simulated payment overdraws the balance",
            );
        }
        Ok(result)
    }

    async fn stats(&self) -> Result<StatsSnapshot, GatewayError> {
        Ok(oracle::demo_stats(chrono::Utc::now()))
    }

    async fn upload(&self, file: &UploadFile) -> Result<UploadReport, GatewayError> {
        Self::pause(self.config.upload_delay).await;
        tracing::debug!(file = %file.file_name, bytes = file.bytes.len(), "Simulated batch analysis");
        let report = oracle::simulate_upload(&mut rand::rng());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(merchant: &str, amount: Money) -> TransactionRequest {
        TransactionRequest {
            username: "asha".into(),
            merchant: merchant.into(),
            amount,
            category: "Transfer".into(),
            timestamp: "2024-03-01T23:10".into(),
        }
    }

    #[tokio::test]
    async fn gambling_payment_is_blocked_without_debit() {
        let backend = SimulatedBackend::new(SimulationConfig::instant());
        let result = backend
            .pay(&request("Gambling Site", 30_000.0), 50_000.0)
            .await
            .unwrap();
        assert!(result.is_fraud);
        assert!((70..=99).contains(&result.risk_score));
        assert_eq!(result.new_balance, 50_000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn payment_waits_for_configured_delay() {
        let backend = SimulatedBackend::default();
        let started = tokio::time::Instant::now();
        backend.pay(&request("Swiggy", 250.0), 1_000.0).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn upload_waits_for_configured_delay() {
        let backend = SimulatedBackend::default();
        let file = UploadFile {
            file_name: "batch.csv".into(),
            bytes: b"Merchant,Amount,Category\n".to_vec(),
        };
        let started = tokio::time::Instant::now();
        let report = backend.upload(&file).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!((50..=549).contains(&report.total_processed));
    }

    #[tokio::test]
    async fn login_always_succeeds_into_demo_session() {
        let backend = SimulatedBackend::default();
        let session = backend
            .login(&LoginRequest {
                username: "asha".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.balance, 50_000.0);
        assert_eq!(session.full_name, "Demo User");
        assert_eq!(backend.mode(), Mode::Demo);
    }
}
