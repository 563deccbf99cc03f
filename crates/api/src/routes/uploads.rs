//! PDF upload routes.

use std::path::{Path, PathBuf};

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::{AppState, middleware::AuthUser};
use sheetwise_core::extraction::{
    Extraction, IngestError, IngestSummary, LopdfTableSource, extract,
};

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload-pdf", post(upload_pdf))
}

/// Response for an uploaded PDF.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always true when the upload was accepted.
    pub success: bool,
    /// Name of the uploaded file.
    pub filename: String,
    /// Extraction and reconcile counts.
    pub summary: IngestSummary,
}

/// Parts of the multipart form.
struct UploadForm {
    filename: String,
    bytes: Vec<u8>,
    company_id: Option<i32>,
}

async fn read_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut file = None;
    let mut company_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.body_text()))?;
                file = Some((filename, bytes.to_vec()));
            }
            Some("company_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(e.body_text()))?;
                let text = text.trim();
                if !text.is_empty() {
                    let id = text
                        .parse::<i32>()
                        .map_err(|_| ApiError::validation("company_id must be an integer"))?;
                    company_id = Some(id);
                }
            }
            _ => {}
        }
    }

    let Some((filename, bytes)) = file else {
        return Err(ApiError::validation("No file part"));
    };
    if filename.is_empty() {
        return Err(ApiError::validation("No selected file"));
    }

    Ok(UploadForm {
        filename,
        bytes,
        company_id,
    })
}

/// POST /upload-pdf - Extract balance sheet tables from a PDF into the store.
///
/// The target company is checked before the file is stored, and the file is
/// removed once it has been read. A PDF that cannot be read yields an empty
/// summary.
async fn upload_pdf(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let form = read_form(multipart).await?;
    let (dir, bytes, filename) = (state.upload_dir.as_path(), &form.bytes, &form.filename);
    let user_id = user.id;

    let summary = state
        .reconciler()
        .ingest(&user, form.company_id, |company_id| async move {
            let path = save_upload(dir, bytes).await?;
            info!(user_id, company_id, filename = %filename, "Stored uploaded PDF");

            let extraction = read_upload(path.clone()).await;
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove uploaded PDF");
            }
            extraction
        })
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        filename: form.filename,
        summary,
    }))
}

/// Writes the upload under a fresh name in the upload directory.
async fn save_upload(dir: &Path, bytes: &[u8]) -> Result<PathBuf, IngestError> {
    let io = |e: std::io::Error| IngestError::Io(e.to_string());

    tokio::fs::create_dir_all(dir).await.map_err(io)?;
    let path = dir.join(format!("{}.pdf", Uuid::new_v4()));
    tokio::fs::write(&path, bytes).await.map_err(io)?;

    Ok(path)
}

/// Parses the stored PDF off the async runtime.
async fn read_upload(path: PathBuf) -> Result<Extraction, IngestError> {
    tokio::task::spawn_blocking(move || LopdfTableSource::open(&path).map(|source| extract(&source)))
        .await
        .map_err(|e| IngestError::Io(e.to_string()))?
        .map_err(IngestError::Unreadable)
}
