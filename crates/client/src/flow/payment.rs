//! Transaction submission: form snapshot, backend call, balance update
//! and verdict.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──result──▶ Resolved(Live | Demo)
//!                      │
//!                      └──error───▶ Faulted
//! ```
//!
//! Whichever backend answered, the result goes through the same
//! [`settle`](PaymentController::settle) step.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fraudshield_core::transaction::{TransactionForm, TransactionRequest, TransactionResult};
use fraudshield_core::types::{Mode, Money};
use fraudshield_core::verdict::{self, Presentation};

use super::FlowError;
use crate::backend::{BackendSelector, Outcome};
use crate::session::{SessionContext, SubmissionClaim};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Resolved(Mode),
    Faulted,
}

/// Everything produced by one settled payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub request: TransactionRequest,
    pub result: TransactionResult,
    pub presentation: Presentation,
    pub mode: Mode,
    /// Session balance after settlement.
    pub balance: Money,
    /// Whether the session balance was debited.
    pub debited: bool,
}

/// Drives payments for one signed-in session. The only writer of the
/// session balance.
pub struct PaymentController {
    session: Arc<SessionContext>,
    selector: BackendSelector,
    state: Mutex<SubmissionState>,
}

impl PaymentController {
    pub fn new(session: Arc<SessionContext>, selector: BackendSelector) -> Self {
        Self {
            session,
            selector,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *lock(&self.state)
    }

    /// Submit one payment.
    ///
    /// Rejected with [`FlowError::SubmissionInProgress`] while another
    /// submission on the same session is in flight, from this controller
    /// or any other.
    pub async fn submit(&self, form: &TransactionForm) -> Result<PaymentReceipt, FlowError> {
        let guard = self.begin()?;

        match self.process(form).await {
            Ok(receipt) => {
                guard.finish(SubmissionState::Resolved(receipt.mode));
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Payment failed");
                guard.finish(SubmissionState::Faulted);
                Err(e)
            }
        }
    }

    fn begin(&self) -> Result<SubmitGuard<'_>, FlowError> {
        let claim = self
            .session
            .try_claim_submission()
            .ok_or(FlowError::SubmissionInProgress)?;
        *lock(&self.state) = SubmissionState::Submitting;
        Ok(SubmitGuard {
            state: &self.state,
            finished: false,
            _claim: claim,
        })
    }

    async fn process(&self, form: &TransactionForm) -> Result<PaymentReceipt, FlowError> {
        let user = self.session.snapshot().await;
        let request = form.to_request(&user)?;
        let balance = user.balance;

        tracing::info!(
            username = %request.username,
            merchant = %request.merchant,
            amount = request.amount,
            category = %request.category,
            "Submitting payment",
        );

        let request_ref = &request;
        let outcome = self
            .selector
            .call("pay", |backend| async move {
                backend.pay(request_ref, balance).await
            })
            .await?;

        self.settle(request, outcome).await
    }

    /// Post-processing shared by the live and simulated paths.
    async fn settle(
        &self,
        request: TransactionRequest,
        outcome: Outcome<TransactionResult>,
    ) -> Result<PaymentReceipt, FlowError> {
        let Outcome { value: result, mode } = outcome;

        let debited = self.session.apply_result(&result).await?;
        let presentation = verdict::present(&result);

        tracing::info!(
            risk_score = result.risk_score,
            is_fraud = result.is_fraud,
            verdict = ?presentation.verdict,
            ?mode,
            "Payment settled",
        );

        Ok(PaymentReceipt {
            request,
            result,
            presentation,
            mode,
            balance: self.session.balance().await,
            debited,
        })
    }
}

/// Held for the duration of a submission. Releases the session's claim
/// when dropped, even if the submission future is abandoned mid-way.
struct SubmitGuard<'a> {
    state: &'a Mutex<SubmissionState>,
    finished: bool,
    _claim: SubmissionClaim<'a>,
}

impl SubmitGuard<'_> {
    fn finish(mut self, outcome: SubmissionState) {
        *lock(self.state) = outcome;
        self.finished = true;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *lock(self.state) = SubmissionState::Faulted;
        }
    }
}

fn lock(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
