//! Transaction backends: the live HTTP backend and a local simulation
//! that answers with the same shapes.
//!
//! Flows never branch on which one they are talking to. The
//! [`BackendSelector`] picks one per call and falls back to the simulation
//! when the live backend turns out to be unreachable.

pub mod remote;
pub mod selector;
pub mod simulated;

use async_trait::async_trait;

use fraudshield_core::auth::{Acknowledgement, LoginRequest, RegisterRequest, ResetPasswordRequest};
use fraudshield_core::session::UserSession;
use fraudshield_core::stats::StatsSnapshot;
use fraudshield_core::transaction::{TransactionRequest, TransactionResult};
use fraudshield_core::types::{Mode, Money};
use fraudshield_core::upload::UploadReport;

use crate::gateway::{GatewayError, UploadFile};

pub use remote::RemoteBackend;
pub use selector::BackendSelector;
pub use simulated::SimulatedBackend;

/// Everything the dashboard asks of a backend.
#[async_trait]
pub trait TransactionBackend: Send + Sync {
    /// Whether results from this backend are live or simulated.
    fn mode(&self) -> Mode;

    /// Cheap connectivity check used before each call.
    async fn is_reachable(&self) -> bool;

    async fn login(&self, request: &LoginRequest) -> Result<UserSession, GatewayError>;

    async fn register(&self, request: &RegisterRequest) -> Result<Acknowledgement, GatewayError>;

    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<Acknowledgement, GatewayError>;

    /// Score and settle one payment. `balance` is the caller's cached
    /// balance; the live backend uses its own ledger instead.
    async fn pay(
        &self,
        request: &TransactionRequest,
        balance: Money,
    ) -> Result<TransactionResult, GatewayError>;

    async fn stats(&self) -> Result<StatsSnapshot, GatewayError>;

    async fn upload(&self, file: &UploadFile) -> Result<UploadReport, GatewayError>;
}

/// A value together with the mode of the backend that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub mode: Mode,
}

impl<T> Outcome<T> {
    pub fn new(value: T, mode: Mode) -> Self {
        Self { value, mode }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            mode: self.mode,
        }
    }
}
