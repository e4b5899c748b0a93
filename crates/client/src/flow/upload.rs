//! Batch CSV upload for offline analysis.

use std::path::Path;

use fraudshield_core::upload::UploadReport;

use super::FlowError;
use crate::backend::{BackendSelector, Outcome};
use crate::gateway::UploadFile;

/// Read `path` and send it for batch analysis.
pub async fn upload_file(
    selector: &BackendSelector,
    path: &Path,
) -> Result<Outcome<UploadReport>, FlowError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| FlowError::File {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());

    let file = UploadFile { file_name, bytes };
    upload(selector, &file).await
}

pub async fn upload(
    selector: &BackendSelector,
    file: &UploadFile,
) -> Result<Outcome<UploadReport>, FlowError> {
    tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "Uploading batch");

    let outcome = selector
        .call("upload", |backend| async move { backend.upload(file).await })
        .await?;

    tracing::info!(
        total_processed = outcome.value.total_processed,
        fraud_found = outcome.value.fraud_found,
        mode = ?outcome.mode,
        "Batch analysed",
    );
    Ok(outcome)
}
