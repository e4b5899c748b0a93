#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use fraudshield_client::backend::simulated::SimulationConfig;
use fraudshield_client::backend::BackendSelector;
use fraudshield_client::config::ClientConfig;
use fraudshield_client::session::{SessionContext, SessionStore};
use fraudshield_core::session::UserSession;
use fraudshield_core::transaction::TransactionForm;

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// A `GET /` route is added so the connectivity probe sees a live backend.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router.route(
        "/",
        get(|| async { Json(json!({ "message": "Fraud Shield API is running" })) }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Backend that answers `GET` requests (so the connectivity probe
/// succeeds) and hangs up on everything else without a response.
pub async fn spawn_hangup_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                if head.starts_with(b"GET ") {
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
                        )
                        .await;
                }
            });
        }
    });
    format!("http://{addr}")
}

/// URL of a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Build a test `ClientConfig`: short timeouts, no simulated latency, no
/// animation.
pub fn test_config(api_url: &str, dir: &TempDir) -> ClientConfig {
    let mut config = ClientConfig::from_lookup(|_| None).unwrap();
    config.api_url = api_url.to_string();
    config.request_timeout = Duration::from_secs(5);
    config.probe_timeout = Duration::from_millis(500);
    config.session_dir = dir.path().join("session");
    config.simulation = SimulationConfig::instant();
    config.animation = Duration::ZERO;
    config
}

/// Selector plus session store rooted in a throwaway directory.
pub struct Harness {
    pub selector: BackendSelector,
    pub store: SessionStore,
    _dir: TempDir,
}

pub fn harness(api_url: &str) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(api_url, &dir);
    Harness {
        selector: BackendSelector::from_config(&config).unwrap(),
        store: SessionStore::new(&config.session_dir),
        _dir: dir,
    }
}

impl Harness {
    /// Persist a signed-in user with the given balance.
    pub async fn sign_in(&self, balance: f64) -> Arc<SessionContext> {
        let user = UserSession::new("asha", "Asha Rao", balance);
        Arc::new(SessionContext::establish(self.store.clone(), user).await.unwrap())
    }
}

pub fn form(merchant: &str, amount: f64) -> TransactionForm {
    TransactionForm {
        merchant: merchant.to_string(),
        amount,
        category: "Shopping".to_string(),
        timestamp: Some("2024-03-01T09:30".to_string()),
    }
}
