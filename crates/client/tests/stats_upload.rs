mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use fraudshield_client::flow::{stats, upload, FlowError};
use fraudshield_client::gateway::GatewayError;
use fraudshield_core::oracle;
use fraudshield_core::stats::VolumeChart;
use fraudshield_core::types::Mode;

#[tokio::test]
async fn live_stats_keep_alert_order() {
    let router = Router::new().route(
        "/stats",
        get(|| async {
            Json(json!({
                "total_transactions": 812,
                "fraud_detected": 17,
                "total_volume": 1250000.5,
                "recent_alerts": [
                    { "merchant": "Crypto Hub", "amount": 42000, "time": "2024-03-01T14:05:00", "risk": "High" },
                    { "merchant": "Lucky Casino", "amount": 9000, "time": "2024-03-01T11:40:00", "risk": "High" }
                ]
            }))
        }),
    );
    let url = common::spawn_backend(router).await;
    let h = common::harness(&url);

    let outcome = stats::load_dashboard(&h.selector).await.unwrap();
    assert_eq!(outcome.mode, Mode::Live);
    let view = outcome.value;
    assert_eq!(view.stats.total_transactions, 812);
    assert_eq!(view.stats.total_volume, Some(1250000.5));
    let merchants: Vec<_> = view.stats.recent_alerts.iter().map(|a| a.merchant.as_str()).collect();
    assert_eq!(merchants, ["Crypto Hub", "Lucky Casino"]);
    assert_eq!(view.chart, VolumeChart::default());
}

#[tokio::test]
async fn offline_stats_show_demo_dataset() {
    let h = common::harness(&common::unreachable_url());

    let outcome = stats::load_dashboard(&h.selector).await.unwrap();
    assert_eq!(outcome.mode, Mode::Demo);
    assert_eq!(outcome.value.stats.total_transactions, 3420);
    assert_eq!(outcome.value.stats.fraud_detected, 124);
    assert_eq!(outcome.value.stats.recent_alerts.len(), 3);
    assert_eq!(outcome.value.stats.recent_alerts[0].merchant, "Overseas Gambling Site");
}

#[tokio::test]
async fn stats_failure_is_not_replaced_by_demo_data() {
    let router = Router::new().route(
        "/stats",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Stats unavailable" })),
            )
        }),
    );
    let url = common::spawn_backend(router).await;
    let h = common::harness(&url);

    let err = stats::load_dashboard(&h.selector).await.unwrap_err();
    assert_matches!(err, FlowError::Gateway(GatewayError::Backend { status: 500, .. }));
    assert_eq!(err.user_message(), "Stats unavailable");
}

#[tokio::test]
async fn live_upload_reads_file_from_disk() {
    let router = Router::new().route(
        "/upload",
        post(|_file: axum::body::Bytes| async {
            Json(json!({
                "total_processed": 2,
                "fraud_found": 1,
                "preview": [{ "Merchant": "Crypto Hub", "Amount": 42000, "Risk": "High" }]
            }))
        }),
    );
    let url = common::spawn_backend(router).await;
    let h = common::harness(&url);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("march.csv");
    std::fs::write(&path, "Merchant,Amount\nSwiggy,320\nCrypto Hub,42000\n").unwrap();

    let outcome = upload::upload_file(&h.selector, &path).await.unwrap();
    assert_eq!(outcome.mode, Mode::Live);
    assert_eq!(outcome.value.fraud_found, 1);
    assert_eq!(outcome.value.preview.len(), 1);
}

#[tokio::test]
async fn offline_upload_fabricates_report() {
    let h = common::harness(&common::unreachable_url());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.csv");
    std::fs::write(&path, "Merchant,Amount\n").unwrap();

    let outcome = upload::upload_file(&h.selector, &path).await.unwrap();
    assert_eq!(outcome.mode, Mode::Demo);
    let report = outcome.value;
    assert!(oracle::DEMO_UPLOAD_ROWS.contains(&report.total_processed));
    assert_eq!(
        report.fraud_found,
        report.total_processed * oracle::DEMO_UPLOAD_FRAUD_PERCENT / 100
    );
    assert!(report.preview.is_empty());
}

#[tokio::test]
async fn missing_file_is_reported() {
    let h = common::harness(&common::unreachable_url());
    let dir = tempfile::tempdir().unwrap();

    let err = upload::upload_file(&h.selector, &dir.path().join("nope.csv"))
        .await
        .unwrap_err();
    assert_matches!(err, FlowError::File { .. });
}
