//! Supplier document parsing
//!
//! Two small pattern-based parsers: one recognizing tire dimension
//! descriptors inside free-text descriptions, one recognizing transaction
//! lines in the text extracted from supplier invoice PDFs.

pub mod dimension;
pub mod patterns;
pub mod supplier_lines;

pub use dimension::{parse_description, DimensionInfo};
pub use supplier_lines::{extract_candidate_rows, scan_page, CandidateRow, PageScan};
