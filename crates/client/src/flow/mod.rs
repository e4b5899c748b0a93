//! User-facing flows: sign-in, payment, dashboard stats and batch upload.
//!
//! Every flow goes through a [`BackendSelector`](crate::backend::BackendSelector)
//! so unreachable backends degrade to demo mode the same way everywhere,
//! while errors the backend reports itself are surfaced unchanged.

pub mod auth;
pub mod payment;
pub mod stats;
pub mod upload;

use fraudshield_core::error::CoreError;

use crate::gateway::GatewayError;
use crate::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Input rejected before anything was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("A payment is already being processed")]
    SubmissionInProgress,

    #[error("Cannot read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FlowError {
    /// Message to show the user, e.g. the backend's `detail` verbatim.
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Gateway(GatewayError::Backend { detail, .. }) => detail.clone(),
            other => other.to_string(),
        }
    }
}
