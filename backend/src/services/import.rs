//! Supplier invoice import service
//!
//! Turns an uploaded supplier PDF into stock: text extraction, per-page
//! line scanning, then sequential reconciliation of each candidate row.
//! A sha-256 fingerprint of the uploaded bytes guards against importing
//! the same document twice, which would silently double-count stock.
//!
//! Failure policy: each row commits in its own transaction; a failed row
//! is reported with its index and description and the batch continues.
//! Prior rows stay committed either way, so the report is the operator's
//! source of truth for partial completion.

use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::parser::{scan_page, CandidateRow};
use crate::services::stock::StockService;

/// Supplier import service
#[derive(Clone)]
pub struct ImportService {
    db: PgPool,
}

/// One candidate row as shown to the operator before confirmation.
#[derive(Debug, Serialize)]
pub struct PreviewRow {
    pub dimension: String,
    pub brand: String,
    pub season: shared::types::Season,
    pub quantity: i32,
    pub unit_price: rust_decimal::Decimal,
}

/// Parse-only view of an uploaded document.
#[derive(Debug, Serialize)]
pub struct ImportPreview {
    pub source_name: String,
    pub fingerprint: String,
    pub rows: Vec<PreviewRow>,
    /// Transaction lines whose description had no parsable dimension
    pub rejected: usize,
}

/// A row that failed to persist.
#[derive(Debug, Serialize)]
pub struct RowFailure {
    pub index: usize,
    pub description: String,
    pub error: String,
}

/// Outcome of a committed import.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub source_name: String,
    pub fingerprint: String,
    /// Candidate rows detected in the document
    pub detected: usize,
    /// Rows applied to stock
    pub imported: usize,
    /// Transaction lines dropped at parse time
    pub rejected: usize,
    pub failures: Vec<RowFailure>,
}

/// Hex-encoded sha-256 of the uploaded document.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Extract per-page text from the PDF. Pages come back separated by form
/// feeds; a document without them is treated as a single page, which is
/// harmless since the scanner holds no cross-page state.
fn extract_pages(bytes: &[u8]) -> AppResult<Vec<String>> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::PdfExtraction(e.to_string()))?;
    Ok(text.split('\u{0c}').map(str::to_string).collect())
}

fn scan_document(bytes: &[u8]) -> AppResult<(Vec<CandidateRow>, usize)> {
    let mut rows = Vec::new();
    let mut rejected = 0;
    for page in extract_pages(bytes)? {
        let scan = scan_page(&page);
        rows.extend(scan.rows);
        rejected += scan.rejected;
    }
    Ok((rows, rejected))
}

impl ImportService {
    /// Create a new ImportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Parse the document without writing anything.
    pub async fn preview(&self, bytes: &[u8], source_name: &str) -> AppResult<ImportPreview> {
        let (rows, rejected) = scan_document(bytes)?;
        Ok(ImportPreview {
            source_name: source_name.to_string(),
            fingerprint: fingerprint(bytes),
            rows: rows.iter().map(preview_row).collect(),
            rejected,
        })
    }

    /// Parse the document and apply every candidate row to stock.
    ///
    /// Rows are processed strictly in order: a later row for the same
    /// (dimension, brand) must see the totals left by earlier rows.
    pub async fn commit(&self, bytes: &[u8], source_name: &str) -> AppResult<ImportReport> {
        let fingerprint = fingerprint(bytes);

        let already_imported = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM supplier_imports WHERE fingerprint = $1)",
        )
        .bind(&fingerprint)
        .fetch_one(&self.db)
        .await?;

        if already_imported {
            return Err(AppError::DuplicateImport(source_name.to_string()));
        }

        let (rows, rejected) = scan_document(bytes)?;
        let detected = rows.len();
        let stock = StockService::new(self.db.clone());

        let mut imported = 0;
        let mut failures = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            match stock.record_purchase(row, source_name).await {
                Ok(_) => imported += 1,
                Err(e) => {
                    tracing::warn!(
                        "import row {} ({}) failed: {}",
                        index,
                        row.description,
                        e
                    );
                    failures.push(RowFailure {
                        index,
                        description: row.description.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        sqlx::query(
            r#"
            INSERT INTO supplier_imports (fingerprint, source_name, rows_detected,
                                          rows_imported, rows_rejected, rows_failed)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&fingerprint)
        .bind(source_name)
        .bind(detected as i32)
        .bind(imported as i32)
        .bind(rejected as i32)
        .bind(failures.len() as i32)
        .execute(&self.db)
        .await?;

        Ok(ImportReport {
            source_name: source_name.to_string(),
            fingerprint,
            detected,
            imported: imported as usize,
            rejected,
            failures,
        })
    }

    /// Past imports, newest first.
    pub async fn list(&self) -> AppResult<Vec<ImportRecord>> {
        let records = sqlx::query_as::<_, ImportRecord>(
            r#"
            SELECT fingerprint, source_name, rows_detected, rows_imported,
                   rows_rejected, rows_failed, created_at
            FROM supplier_imports
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(records)
    }
}

/// Row of the supplier_imports log.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ImportRecord {
    pub fingerprint: String,
    pub source_name: String,
    pub rows_detected: i32,
    pub rows_imported: i32,
    pub rows_rejected: i32,
    pub rows_failed: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn preview_row(row: &CandidateRow) -> PreviewRow {
    PreviewRow {
        dimension: row.dimension.dimension.clone(),
        brand: row.dimension.brand.clone(),
        season: row.dimension.season,
        quantity: row.quantity,
        unit_price: row.unit_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = fingerprint(b"facture deldo 2024-118");
        let b = fingerprint(b"facture deldo 2024-118");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_differs_per_document() {
        assert_ne!(fingerprint(b"doc a"), fingerprint(b"doc b"));
    }
}
