//! Login, signup, password reset and logout.

use fraudshield_core::auth::{self, Acknowledgement, LoginRequest, RegisterRequest, ResetPasswordRequest};

use super::FlowError;
use crate::backend::{BackendSelector, Outcome};
use crate::session::{SessionContext, SessionStore};

/// Authenticate and persist the session.
///
/// Offline, this always succeeds into a demo session.
pub async fn login(
    selector: &BackendSelector,
    store: SessionStore,
    request: &LoginRequest,
) -> Result<Outcome<SessionContext>, FlowError> {
    auth::check(request)?;

    let outcome = selector
        .call("login", |backend| async move { backend.login(request).await })
        .await?;

    if outcome.mode.is_demo() {
        tracing::warn!(username = %request.username, "Entering demo mode");
    }

    let mode = outcome.mode;
    let session = SessionContext::establish(store, outcome.value).await?;
    Ok(Outcome::new(session, mode))
}

/// Create an account. The user still has to log in afterwards.
pub async fn signup(
    selector: &BackendSelector,
    request: &RegisterRequest,
) -> Result<Outcome<Acknowledgement>, FlowError> {
    auth::check(request)?;

    let outcome = selector
        .call("register", |backend| async move { backend.register(request).await })
        .await?;
    tracing::info!(username = %request.username, mode = ?outcome.mode, "Account created");
    Ok(outcome)
}

pub async fn reset_password(
    selector: &BackendSelector,
    request: &ResetPasswordRequest,
) -> Result<Outcome<Acknowledgement>, FlowError> {
    auth::check(request)?;

    let outcome = selector
        .call("reset-password", |backend| async move {
            backend.reset_password(request).await
        })
        .await?;
    tracing::info!(username = %request.username, mode = ?outcome.mode, "Password reset");
    Ok(outcome)
}

/// Restore the signed-in session, or fail with [`FlowError::NotLoggedIn`].
pub async fn require_session(store: SessionStore) -> Result<SessionContext, FlowError> {
    SessionContext::restore(store)
        .await?
        .ok_or(FlowError::NotLoggedIn)
}

/// Sign out. Returns whether a session existed.
pub async fn logout(store: SessionStore) -> Result<bool, FlowError> {
    match SessionContext::restore(store.clone()).await {
        Ok(Some(session)) => {
            session.end().await?;
            Ok(true)
        }
        Ok(None) => Ok(false),
        // A corrupt slot is still removed on logout.
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable session");
            Ok(store.clear().await?)
        }
    }
}
