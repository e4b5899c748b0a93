//! Per-call choice between the live backend and the simulation.

use std::future::Future;
use std::sync::Arc;

use crate::backend::{Outcome, RemoteBackend, SimulatedBackend, TransactionBackend};
use crate::config::ClientConfig;
use crate::gateway::{BackendGateway, GatewayError};

/// Picks a backend for each call with a connectivity probe, and reruns the
/// call on the fallback if the primary proves unreachable mid-call.
///
/// Backend-reported errors are never masked: only
/// [`GatewayError::NetworkUnavailable`] triggers the fallback.
#[derive(Clone)]
pub struct BackendSelector {
    primary: Arc<dyn TransactionBackend>,
    fallback: Arc<dyn TransactionBackend>,
}

impl BackendSelector {
    pub fn new(primary: Arc<dyn TransactionBackend>, fallback: Arc<dyn TransactionBackend>) -> Self {
        Self { primary, fallback }
    }

    /// Live backend at `config.api_url`, simulated fallback.
    pub fn from_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let gateway = BackendGateway::new(
            config.api_url.clone(),
            config.request_timeout,
            config.probe_timeout,
        )?;
        Ok(Self::new(
            Arc::new(RemoteBackend::new(gateway)),
            Arc::new(SimulatedBackend::new(config.simulation)),
        ))
    }

    /// Probe the primary and return whichever backend should serve the
    /// next call, flagging whether it is the fallback.
    async fn select(&self, operation: &'static str) -> (Arc<dyn TransactionBackend>, bool) {
        if self.primary.is_reachable().await {
            (Arc::clone(&self.primary), false)
        } else {
            tracing::warn!(operation, "Backend unavailable, using simulated backend");
            (Arc::clone(&self.fallback), true)
        }
    }

    /// Run `call` against the selected backend.
    ///
    /// The closure may run twice (primary, then fallback), so it must be
    /// `Fn` and must not have side effects of its own.
    pub async fn call<T, F, Fut>(
        &self,
        operation: &'static str,
        call: F,
    ) -> Result<Outcome<T>, GatewayError>
    where
        F: Fn(Arc<dyn TransactionBackend>) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let (backend, is_fallback) = self.select(operation).await;
        let mode = backend.mode();

        match call(backend).await {
            Ok(value) => Ok(Outcome::new(value, mode)),
            Err(GatewayError::NetworkUnavailable(reason)) if !is_fallback => {
                tracing::warn!(
                    operation,
                    error = %reason,
                    "Backend dropped mid-call, using simulated backend",
                );
                let value = call(Arc::clone(&self.fallback)).await?;
                Ok(Outcome::new(value, self.fallback.mode()))
            }
            Err(e) => Err(e),
        }
    }
}
