//! Payment request/result types and the transaction form snapshot.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::session::UserSession;
use crate::types::{Money, RiskScore, MAX_RISK_SCORE};

/// Format used by the form's timestamp field: local time, minute precision.
pub const FORM_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Raw values entered on the payment form.
#[derive(Debug, Clone, Validate)]
pub struct TransactionForm {
    #[validate(length(min = 1, message = "merchant must not be empty"))]
    pub merchant: String,
    #[validate(range(exclusive_min = 0.0, message = "amount must be positive"))]
    pub amount: Money,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    /// Defaults to the current local time when absent.
    pub timestamp: Option<String>,
}

/// Body of `POST /transaction/pay`. Built once per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub username: String,
    pub merchant: String,
    pub amount: Money,
    pub category: String,
    pub timestamp: String,
}

/// Outcome label reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "Failed (Fraud)")]
    FailedFraud,
}

impl TransactionStatus {
    pub fn from_fraud_flag(is_fraud: bool) -> Self {
        if is_fraud {
            TransactionStatus::FailedFraud
        } else {
            TransactionStatus::Success
        }
    }
}

/// Response of `POST /transaction/pay`, produced by either backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub status: TransactionStatus,
    pub is_fraud: bool,
    pub risk_score: RiskScore,
    pub new_balance: Money,
}

impl TransactionResult {
    /// Reject scores outside `0..=100`.
    pub fn check_range(&self) -> Result<(), CoreError> {
        if self.risk_score > MAX_RISK_SCORE {
            return Err(CoreError::Validation(format!(
                "risk_score must be between 0 and {MAX_RISK_SCORE}, got {}",
                self.risk_score
            )));
        }
        Ok(())
    }
}

impl TransactionForm {
    /// Snapshot the form into a request for the signed-in user.
    pub fn to_request(&self, session: &UserSession) -> Result<TransactionRequest, CoreError> {
        self.validate()?;
        if !self.amount.is_finite() {
            return Err(CoreError::Validation(
                "amount must be a finite number".to_string(),
            ));
        }
        if self.merchant.trim().is_empty() {
            return Err(CoreError::Validation(
                "merchant must not be empty".to_string(),
            ));
        }

        let timestamp = match &self.timestamp {
            Some(ts) => {
                NaiveDateTime::parse_from_str(ts, FORM_TIMESTAMP_FORMAT).map_err(|e| {
                    CoreError::Validation(format!("timestamp '{ts}' is not YYYY-MM-DDTHH:MM: {e}"))
                })?;
                ts.clone()
            }
            None => default_timestamp(),
        };

        Ok(TransactionRequest {
            username: session.username.clone(),
            merchant: self.merchant.trim().to_string(),
            amount: self.amount,
            category: self.category.clone(),
            timestamp,
        })
    }
}

/// Current local time in the form's timestamp format.
pub fn default_timestamp() -> String {
    format_form_timestamp(chrono::Local::now().naive_local())
}

pub fn format_form_timestamp(at: NaiveDateTime) -> String {
    at.format(FORM_TIMESTAMP_FORMAT).to_string()
}
