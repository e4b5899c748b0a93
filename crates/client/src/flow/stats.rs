//! Dashboard counters, recent alerts and volume chart.

use fraudshield_core::stats::{StatsSnapshot, VolumeChart};

use super::FlowError;
use crate::backend::{BackendSelector, Outcome};

/// Data behind the dashboard's stats tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: StatsSnapshot,
    pub chart: VolumeChart,
}

/// Load dashboard data. Offline, the fixed demo dataset is shown.
///
/// Alerts are kept in the order the backend sent them.
pub async fn load_dashboard(selector: &BackendSelector) -> Result<Outcome<DashboardView>, FlowError> {
    let outcome = selector
        .call("stats", |backend| async move { backend.stats().await })
        .await?;

    tracing::info!(
        total_transactions = outcome.value.total_transactions,
        fraud_detected = outcome.value.fraud_detected,
        alerts = outcome.value.recent_alerts.len(),
        mode = ?outcome.mode,
        "Dashboard stats loaded",
    );

    Ok(outcome.map(|stats| DashboardView {
        stats,
        chart: VolumeChart::default(),
    }))
}
