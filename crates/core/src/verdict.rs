//! Mapping from a risk score to the verdict shown to the user.

use serde::Serialize;

use crate::transaction::TransactionResult;
use crate::types::{RiskScore, MAX_RISK_SCORE};

/// Scores strictly above this are blocked.
pub const BLOCK_THRESHOLD: RiskScore = 70;

/// Scores strictly above this (and not blocked) are flagged for review.
pub const REVIEW_THRESHOLD: RiskScore = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Blocked,
    Review,
    Success,
}

/// Display colour of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictColor {
    Red,
    Amber,
    Green,
}

impl VerdictColor {
    pub fn hex(self) -> &'static str {
        match self {
            VerdictColor::Red => "#ef4444",
            VerdictColor::Amber => "#f59e0b",
            VerdictColor::Green => "#10b981",
        }
    }
}

impl Verdict {
    pub fn from_score(score: RiskScore) -> Self {
        if score > BLOCK_THRESHOLD {
            Verdict::Blocked
        } else if score > REVIEW_THRESHOLD {
            Verdict::Review
        } else {
            Verdict::Success
        }
    }

    pub fn color(self) -> VerdictColor {
        match self {
            Verdict::Blocked => VerdictColor::Red,
            Verdict::Review => VerdictColor::Amber,
            Verdict::Success => VerdictColor::Green,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Blocked => "Transfer Blocked!",
            Verdict::Review => "Review Advised",
            Verdict::Success => "Payment Successful",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Blocked => "High fraud risk detected. Money not deducted.",
            Verdict::Review => "Payment processed but flagged for review.",
            Verdict::Success => "Transaction validated and processed.",
        }
    }
}

/// Everything the result overlay needs, derived from one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub verdict: Verdict,
    pub color: VerdictColor,
    pub headline: &'static str,
    pub message: &'static str,
    pub risk_score: RiskScore,
    /// Gauge fill in `[0.0, 1.0]`.
    pub gauge_fill: f64,
}

/// Present a result. Pure: equal inputs give equal presentations.
pub fn present(result: &TransactionResult) -> Presentation {
    let verdict = Verdict::from_score(result.risk_score);
    Presentation {
        verdict,
        color: verdict.color(),
        headline: verdict.headline(),
        message: verdict.message(),
        risk_score: result.risk_score,
        gauge_fill: gauge_fill(result.risk_score),
    }
}

/// Fraction of the circular gauge to fill for `score`.
pub fn gauge_fill(score: RiskScore) -> f64 {
    f64::from(score.min(MAX_RISK_SCORE)) / f64::from(MAX_RISK_SCORE)
}

/// Stroke dash offset of a ring with the given circumference.
pub fn gauge_dash_offset(circumference: f64, score: RiskScore) -> f64 {
    circumference - gauge_fill(score) * circumference
}
