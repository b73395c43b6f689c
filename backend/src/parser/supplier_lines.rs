//! Supplier invoice line extractor
//!
//! Scans the plain text of one supplier PDF page for transaction lines of
//! the fixed tabular convention: quantity, description, unit price, and a
//! trailing supplier amount that is discarded. Lines that do not match, or
//! whose description carries no recognizable tire dimension, are silently
//! skipped. The extractor holds no cross-page state and may be re-run per
//! page in any order.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::dimension::{parse_description, DimensionInfo};
use super::patterns::SUPPLIER_LINE;

/// One candidate import row extracted from a supplier page.
#[derive(Debug, Clone)]
pub struct CandidateRow {
    pub quantity: i32,
    /// Raw description text between the quantity and the amounts
    pub description: String,
    /// Unit purchase price
    pub unit_price: Decimal,
    /// Parsed dimension; always valid for extracted rows
    pub dimension: DimensionInfo,
}

/// Result of scanning one page: extracted rows plus the count of lines
/// that matched the transaction pattern but carried no parsable dimension.
/// The rejected count feeds the operator-facing import report.
#[derive(Debug, Default)]
pub struct PageScan {
    pub rows: Vec<CandidateRow>,
    pub rejected: usize,
}

/// Extract candidate import rows from one page of supplier text.
pub fn extract_candidate_rows(page_text: &str) -> Vec<CandidateRow> {
    scan_page(page_text).rows
}

/// Scan one page, keeping the rejected-row count.
pub fn scan_page(page_text: &str) -> PageScan {
    let mut scan = PageScan::default();
    for line in page_text.lines() {
        match extract_row(line.trim()) {
            Ok(Some(row)) => scan.rows.push(row),
            Ok(None) => {}
            Err(()) => scan.rejected += 1,
        }
    }
    scan
}

/// Ok(Some) for an import row, Ok(None) for a line that is not a
/// transaction line at all, Err(()) for a transaction line whose
/// description has no recognizable dimension.
fn extract_row(line: &str) -> Result<Option<CandidateRow>, ()> {
    let caps = match SUPPLIER_LINE.captures(line) {
        Some(caps) => caps,
        None => return Ok(None),
    };

    let quantity: i32 = caps["qty"].parse().map_err(|_| ())?;
    let unit_price = Decimal::from_str(&caps["unit_price"]).map_err(|_| ())?;
    let description = caps["desc"].to_string();

    let dimension = parse_description(&description);
    if !dimension.valid {
        return Err(());
    }

    Ok(Some(CandidateRow {
        quantity,
        description,
        unit_price,
        dimension,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn extracts_matching_line() {
        let rows = extract_candidate_rows("4 MICHELIN 205 55 R 16 91 V 58.50 62.00\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 4);
        assert_eq!(rows[0].unit_price, dec("58.50"));
        assert_eq!(rows[0].dimension.dimension, "205/55 R16 91V");
    }

    #[test]
    fn skips_lines_without_dimension() {
        let text = "2 FRAIS DE PORT 10.00 12.00\n4 MICHELIN 205 55 R 16 91 V 58.50 62.00";
        let scan = scan_page(text);
        assert_eq!(scan.rows.len(), 1);
        assert_eq!(scan.rows[0].dimension.brand, "MICHELIN");
        assert_eq!(scan.rejected, 1);
    }

    #[test]
    fn skips_non_matching_lines_silently() {
        let text = "FACTURE N 2024-118\nPage 1/2\nTotal HT 1180.00";
        assert!(extract_candidate_rows(text).is_empty());
    }
}
