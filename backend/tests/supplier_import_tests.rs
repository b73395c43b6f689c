//! Supplier page scanning: transaction line extraction and skip policy

use rust_decimal::Decimal;
use std::str::FromStr;
use tireshop_backend::parser::{extract_candidate_rows, scan_page};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn extracts_full_supplier_page() {
    let page = "\
FACTURE N 2024-118
DELDO TYRES NV
4 MICHELIN 205 55 R 16 91 V PRIMACY 58.50 62.00
2 CONTINENTAL 225 45 ZR 17 94 Y 81.20 85.00
8 HANKOOK 195 65 R 15 91 T KINERGY 42.00 45.50
Total HT 780.00
";
    let rows = extract_candidate_rows(page);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].quantity, 4);
    assert_eq!(rows[0].unit_price, dec("58.50"));
    assert_eq!(rows[0].dimension.dimension, "205/55 R16 91V");
    assert_eq!(rows[0].dimension.brand, "MICHELIN");

    assert_eq!(rows[1].quantity, 2);
    assert_eq!(rows[1].unit_price, dec("81.20"));
    assert_eq!(rows[1].dimension.dimension, "225/45 R17 94Y");

    assert_eq!(rows[2].quantity, 8);
    assert_eq!(rows[2].dimension.brand, "HANKOOK");
}

#[test]
fn first_decimal_is_the_unit_price() {
    // The trailing supplier amount is discarded
    let rows = extract_candidate_rows("4 MICHELIN 205 55 R 16 91 V 58.50 62.00");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].unit_price, dec("58.50"));
}

#[test]
fn counts_rejected_transaction_lines() {
    let page = "\
2 FRAIS DE PORT 10.00 12.00
1 CONSIGNE PALETTE 5.00 5.00
4 MICHELIN 205 55 R 16 91 V 58.50 62.00
";
    let scan = scan_page(page);
    assert_eq!(scan.rows.len(), 1);
    assert_eq!(scan.rejected, 2);
}

#[test]
fn ignores_headers_and_totals_silently() {
    let page = "\
FACTURE N 2024-118
Page 1/2
Conditions de paiement: 30 jours
Total HT 1180.00
Total TTC 1416.00
";
    let scan = scan_page(page);
    assert!(scan.rows.is_empty());
    assert_eq!(scan.rejected, 0);
}

#[test]
fn pages_scan_independently() {
    // No cross-page state: scanning pages separately, in any order, yields
    // the same rows as scanning them together.
    let page_one = "4 MICHELIN 205 55 R 16 91 V 58.50 62.00";
    let page_two = "2 CONTINENTAL 225 45 ZR 17 94 Y 81.20 85.00";

    let together = extract_candidate_rows(&format!("{}\n{}", page_one, page_two));
    let mut separate = extract_candidate_rows(page_two);
    separate.extend(extract_candidate_rows(page_one));

    assert_eq!(together.len(), 2);
    assert_eq!(separate.len(), 2);

    let mut a: Vec<_> = together.iter().map(|r| r.dimension.dimension.clone()).collect();
    let mut b: Vec<_> = separate.iter().map(|r| r.dimension.dimension.clone()).collect();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[test]
fn description_spans_quantity_to_first_amount() {
    let rows = extract_candidate_rows("6 GOODYEAR 175 70 R 14 84 T VECTOR 4SEASONS G3 39.90 44.00");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].description,
        "GOODYEAR 175 70 R 14 84 T VECTOR 4SEASONS G3"
    );
}
