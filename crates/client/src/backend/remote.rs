use async_trait::async_trait;

use fraudshield_core::auth::{Acknowledgement, LoginRequest, RegisterRequest, ResetPasswordRequest};
use fraudshield_core::session::UserSession;
use fraudshield_core::stats::StatsSnapshot;
use fraudshield_core::transaction::{TransactionRequest, TransactionResult};
use fraudshield_core::types::{Mode, Money};
use fraudshield_core::upload::UploadReport;

use super::TransactionBackend;
use crate::gateway::{BackendGateway, GatewayError, UploadFile};

/// The live backend, reached through a [`BackendGateway`].
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    gateway: BackendGateway,
}

impl RemoteBackend {
    pub fn new(gateway: BackendGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl TransactionBackend for RemoteBackend {
    fn mode(&self) -> Mode {
        Mode::Live
    }

    async fn is_reachable(&self) -> bool {
        self.gateway.probe().await
    }

    async fn login(&self, request: &LoginRequest) -> Result<UserSession, GatewayError> {
        self.gateway.login(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Acknowledgement, GatewayError> {
        self.gateway.register(request).await
    }

    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<Acknowledgement, GatewayError> {
        self.gateway.reset_password(request).await
    }

    async fn pay(
        &self,
        request: &TransactionRequest,
        _balance: Money,
    ) -> Result<TransactionResult, GatewayError> {
        self.gateway.pay(request).await
    }

    async fn stats(&self) -> Result<StatsSnapshot, GatewayError> {
        self.gateway.stats().await
    }

    async fn upload(&self, file: &UploadFile) -> Result<UploadReport, GatewayError> {
        self.gateway.upload(file).await
    }
}
