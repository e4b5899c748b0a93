//! REST client for the Fraud Shield backend.
//!
//! Each method issues exactly one HTTP call and either returns the parsed
//! success payload or a [`GatewayError`]. No retries and no caching: any
//! recovery is the caller's job.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use fraudshield_core::auth::{Acknowledgement, LoginRequest, RegisterRequest, ResetPasswordRequest};
use fraudshield_core::session::UserSession;
use fraudshield_core::stats::StatsSnapshot;
use fraudshield_core::transaction::{TransactionRequest, TransactionResult};
use fraudshield_core::upload::UploadReport;

/// Header carrying a per-call correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Errors from the backend gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The transport call could not complete (connect, DNS, TLS,
    /// timeout, reset).
    #[error("Backend unreachable: {0}")]
    NetworkUnavailable(String),

    /// The backend answered, but with a failure status or a body that
    /// does not match the expected shape.
    #[error("Backend error ({status}): {detail}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Human-readable detail, shown to the user verbatim.
        detail: String,
    },
}

impl GatewayError {
    pub fn is_network_unavailable(&self) -> bool {
        matches!(self, GatewayError::NetworkUnavailable(_))
    }

    fn transport(err: reqwest::Error) -> Self {
        GatewayError::NetworkUnavailable(err.to_string())
    }
}

/// A file queued for batch analysis.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// FastAPI-style error body. `detail` is a string for handled errors and
/// an array of objects for request-validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// HTTP client for a single backend instance.
#[derive(Debug, Clone)]
pub struct BackendGateway {
    client: reqwest::Client,
    api_url: String,
    probe_timeout: Duration,
}

impl BackendGateway {
    /// Create a gateway for `api_url` (e.g. `http://localhost:8000`).
    pub fn new(
        api_url: impl Into<String>,
        request_timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(client, api_url, probe_timeout))
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            probe_timeout,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Report whether the backend answers HTTP at all.
    ///
    /// Any response, whatever its status, counts as reachable.
    pub async fn probe(&self) -> bool {
        let result = self
            .client
            .get(format!("{}/", self.api_url))
            .timeout(self.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) => {
                tracing::debug!(status = response.status().as_u16(), "Backend probe answered");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "Backend probe failed");
                false
            }
        }
    }

    /// `POST /auth/login`.
    pub async fn login(&self, body: &LoginRequest) -> Result<UserSession, GatewayError> {
        self.post_json("/auth/login", body).await
    }

    /// `POST /auth/register`.
    pub async fn register(&self, body: &RegisterRequest) -> Result<Acknowledgement, GatewayError> {
        self.post_json("/auth/register", body).await
    }

    /// `POST /auth/reset-password`.
    pub async fn reset_password(
        &self,
        body: &ResetPasswordRequest,
    ) -> Result<Acknowledgement, GatewayError> {
        self.post_json("/auth/reset-password", body).await
    }

    /// `POST /transaction/pay`.
    ///
    /// A score outside `0..=100` is treated as a malformed body.
    pub async fn pay(&self, body: &TransactionRequest) -> Result<TransactionResult, GatewayError> {
        let result: TransactionResult = self.post_json("/transaction/pay", body).await?;
        result.check_range().map_err(|e| GatewayError::Backend {
            status: 200,
            detail: e.to_string(),
        })?;
        Ok(result)
    }

    /// `GET /stats`.
    pub async fn stats(&self) -> Result<StatsSnapshot, GatewayError> {
        let request = self.client.get(self.url("/stats"));
        self.send(request, "/stats").await
    }

    /// `POST /upload` with the file as multipart field `file`.
    pub async fn upload(&self, file: &UploadFile) -> Result<UploadReport, GatewayError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        let form = Form::new().part("file", part);
        let request = self.client.post(self.url("/upload")).multipart(form);
        self.send(request, "/upload").await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request, path).await
    }

    /// Send one request tagged with a fresh request id and parse the reply.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, GatewayError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%request_id, path, "Calling backend");

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(GatewayError::transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(GatewayError::transport)?;

        if !status.is_success() {
            let detail = error_detail(&body, status.canonical_reason());
            tracing::debug!(%request_id, status = status.as_u16(), %detail, "Backend reported failure");
            return Err(GatewayError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice(&body).map_err(|e| GatewayError::Backend {
            status: status.as_u16(),
            detail: format!("Unexpected response body from {path}: {e}"),
        })
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Prefers the `detail` field, falls back to the raw body, then to the
/// status reason phrase.
fn error_detail(body: &[u8], reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return match parsed.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
    }

    let raw = String::from_utf8_lossy(body).trim().to_string();
    if !raw.is_empty() {
        return raw;
    }

    reason.unwrap_or("Request failed").to_string()
}
