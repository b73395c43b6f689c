//! HTTP handlers for supplier invoice imports
//!
//! Both endpoints take a multipart upload with a single "file" part holding
//! the supplier PDF. Preview parses without writing; commit applies the
//! rows to stock and logs the document fingerprint.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::services::import::{ImportPreview, ImportRecord, ImportReport, ImportService};
use crate::AppState;

/// Read the uploaded PDF out of the multipart body.
async fn read_upload(mut multipart: Multipart) -> AppResult<(Vec<u8>, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation("file", &e.to_string(), "Fichier illisible"))?
    {
        if field.name() == Some("file") {
            let source_name = field
                .file_name()
                .unwrap_or("supplier-invoice.pdf")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation("file", &e.to_string(), "Fichier illisible"))?;
            return Ok((bytes.to_vec(), source_name));
        }
    }
    Err(AppError::validation(
        "file",
        "Missing 'file' part in upload",
        "Aucun fichier fourni",
    ))
}

/// Parse a supplier PDF and return the candidate rows without importing
pub async fn preview_import(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ImportPreview>> {
    let (bytes, source_name) = read_upload(multipart).await?;
    let service = ImportService::new(state.db);
    let preview = service.preview(&bytes, &source_name).await?;
    Ok(Json(preview))
}

/// Import a supplier PDF into stock
pub async fn commit_import(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ImportReport>> {
    let (bytes, source_name) = read_upload(multipart).await?;
    let service = ImportService::new(state.db);
    let report = service.commit(&bytes, &source_name).await?;
    Ok(Json(report))
}

/// Past imports, newest first
pub async fn list_imports(State(state): State<AppState>) -> AppResult<Json<Vec<ImportRecord>>> {
    let service = ImportService::new(state.db);
    let records = service.list().await?;
    Ok(Json(records))
}
