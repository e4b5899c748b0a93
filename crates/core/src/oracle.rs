//! Offline fraud policy and demo datasets.
//!
//! Everything here is deterministic apart from the random source, which
//! callers pass in so the policy can be exercised with a seeded RNG.

use chrono::{Duration, SecondsFormat};
use rand::Rng;

use crate::session::UserSession;
use crate::stats::{Alert, StatsSnapshot};
use crate::transaction::{TransactionRequest, TransactionResult, TransactionStatus};
use crate::types::{Money, RiskScore, Timestamp};
use crate::upload::UploadReport;

/// Amounts strictly above this are treated as fraud.
pub const FRAUD_AMOUNT_THRESHOLD: Money = 20_000.0;

/// Merchant substrings (case-insensitive) treated as fraud.
pub const FRAUD_MERCHANT_KEYWORDS: [&str; 2] = ["crypto", "gambling"];

/// Score range drawn for fraud-flagged payments.
pub const FRAUD_SCORE_RANGE: std::ops::RangeInclusive<RiskScore> = 70..=99;

/// Score range drawn for clean payments.
pub const CLEAN_SCORE_RANGE: std::ops::RangeInclusive<RiskScore> = 0..=19;

pub const DEMO_USERNAME: &str = "demo_user";
pub const DEMO_FULL_NAME: &str = "Demo User";
pub const DEMO_BALANCE: Money = 50_000.0;

/// Row count range for a simulated batch upload.
pub const DEMO_UPLOAD_ROWS: std::ops::RangeInclusive<u64> = 50..=549;

/// Share of simulated upload rows reported as high risk, in percent.
pub const DEMO_UPLOAD_FRAUD_PERCENT: u64 = 5;

/// Apply the offline fraud rule to a request.
pub fn is_suspicious(request: &TransactionRequest) -> bool {
    if request.amount > FRAUD_AMOUNT_THRESHOLD {
        return true;
    }
    let merchant = request.merchant.to_lowercase();
    FRAUD_MERCHANT_KEYWORDS
        .iter()
        .any(|keyword| merchant.contains(keyword))
}

/// Score a payment against `balance` without contacting any backend.
///
/// Fraud leaves the balance untouched; otherwise the amount is debited
/// with no floor at zero.
pub fn assess<R: Rng>(
    request: &TransactionRequest,
    balance: Money,
    rng: &mut R,
) -> TransactionResult {
    let is_fraud = is_suspicious(request);
    let risk_score = if is_fraud {
        rng.random_range(FRAUD_SCORE_RANGE)
    } else {
        rng.random_range(CLEAN_SCORE_RANGE)
    };
    let new_balance = if is_fraud {
        balance
    } else {
        balance - request.amount
    };

    TransactionResult {
        status: TransactionStatus::from_fraud_flag(is_fraud),
        is_fraud,
        risk_score,
        new_balance,
    }
}

/// Session handed out by an offline login.
pub fn demo_session(username: &str) -> UserSession {
    let username = if username.trim().is_empty() {
        DEMO_USERNAME
    } else {
        username
    };
    UserSession::new(username, DEMO_FULL_NAME, DEMO_BALANCE)
}

/// Fixed stats shown when the backend cannot be reached.
///
/// Alerts are stamped relative to `now`: now, one hour ago, two hours ago.
pub fn demo_stats(now: Timestamp) -> StatsSnapshot {
    let stamp = |hours_ago: i64| {
        (now - Duration::hours(hours_ago)).to_rfc3339_opts(SecondsFormat::Millis, true)
    };

    StatsSnapshot {
        total_transactions: 3420,
        fraud_detected: 124,
        total_volume: None,
        recent_alerts: vec![
            Alert {
                merchant: "Overseas Gambling Site".to_string(),
                amount: 25_000.0,
                time: stamp(0),
                risk: "High".to_string(),
            },
            Alert {
                merchant: "Unusual Electronics Store".to_string(),
                amount: 89_000.0,
                time: stamp(1),
                risk: "High".to_string(),
            },
            Alert {
                merchant: "Crypto Wallet Transfer".to_string(),
                amount: 15_400.0,
                time: stamp(2),
                risk: "High".to_string(),
            },
        ],
    }
}

/// Fabricate a batch-analysis report.
pub fn simulate_upload<R: Rng>(rng: &mut R) -> UploadReport {
    let total_processed = rng.random_range(DEMO_UPLOAD_ROWS);
    UploadReport {
        total_processed,
        fraud_found: total_processed * DEMO_UPLOAD_FRAUD_PERCENT / 100,
        preview: Vec::new(),
    }
}
