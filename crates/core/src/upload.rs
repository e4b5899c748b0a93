//! Batch CSV analysis report returned by `POST /upload`.

use serde::{Deserialize, Serialize};

use crate::types::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReport {
    pub total_processed: u64,
    pub fraud_found: u64,
    /// First rows of the analysed file; the simulated backend sends none.
    #[serde(default)]
    pub preview: Vec<PreviewRow>,
}

/// A single analysed row. Field names follow the CSV column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PreviewRow {
    pub merchant: String,
    pub amount: Money,
    pub risk: String,
}
