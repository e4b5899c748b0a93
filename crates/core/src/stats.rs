//! Aggregate counters, the recent-alerts feed and the volume chart series.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// One entry of the recent-alerts feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub merchant: String,
    pub amount: Money,
    /// ISO-8601 timestamp, with or without an offset.
    pub time: String,
    pub risk: String,
}

impl Alert {
    /// Parse `time` as local wall-clock time.
    ///
    /// Offset-bearing timestamps are converted to the local zone; naive
    /// ones are taken as already local.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.time) {
            return Some(dt.with_timezone(&chrono::Local).naive_local());
        }
        NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M"))
            .ok()
    }
}

/// Response of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_transactions: u64,
    pub fraud_detected: u64,
    #[serde(default)]
    pub total_volume: Option<Money>,
    /// Rendered in the order received.
    #[serde(default)]
    pub recent_alerts: Vec<Alert>,
}

/// Hourly safe/fraud transaction counts for the volume chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeChart {
    pub labels: Vec<&'static str>,
    pub safe: Vec<u32>,
    pub fraud: Vec<u32>,
}

impl Default for VolumeChart {
    fn default() -> Self {
        Self {
            labels: vec!["00:00", "04:00", "08:00", "12:00", "16:00", "20:00", "Now"],
            safe: vec![120, 50, 200, 450, 500, 350, 150],
            fraud: vec![10, 2, 5, 8, 12, 15, 3],
        }
    }
}

impl VolumeChart {
    /// Iterate `(label, safe, fraud)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, u32, u32)> + '_ {
        self.labels
            .iter()
            .zip(self.safe.iter().zip(self.fraud.iter()))
            .map(|(label, (safe, fraud))| (*label, *safe, *fraud))
    }
}
