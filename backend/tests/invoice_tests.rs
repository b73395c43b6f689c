//! Invoice totals, numbering, and PDF rendering

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use tireshop_backend::render::{
    compute_totals, render_invoice, wrap_description, ClientBlock, CompanyIdentity,
    InvoiceDocument, RenderLine,
};
use tireshop_backend::services::billing::invoice_number;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn company() -> CompanyIdentity {
    CompanyIdentity {
        name: "JUBAPNEU".into(),
        address: "123 Route du Garage, 57000 METZ".into(),
        siret: "123 456 789 00012".into(),
        payment_terms: "Paiement a reception de facture".into(),
    }
}

fn document(lines: Vec<RenderLine>) -> InvoiceDocument {
    InvoiceDocument {
        company: company(),
        client: ClientBlock {
            name: "Garage Dupont".into(),
            address: Some("4 rue des Lilas".into()),
            postal_code: Some("57000".into()),
            city: Some("METZ".into()),
            tax_id: Some("987 654 321 00021".into()),
        },
        lines,
        number: "FV-2406-1432".into(),
        issue_date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
    }
}

#[test]
fn invoice_number_encodes_timestamp() {
    let at = Utc.with_ymd_and_hms(2024, 6, 14, 14, 32, 5).unwrap();
    assert_eq!(invoice_number(at), "FV-2406-1432");

    let at = Utc.with_ymd_and_hms(2025, 12, 1, 8, 5, 0).unwrap();
    assert_eq!(invoice_number(at), "FV-2512-0805");
}

#[test]
fn worked_example_totals() {
    // 2 tires at 81.90 TTC plus 2 fittings at 15.00 TTC
    let totals = compute_totals(&[
        RenderLine {
            description: "Pneu MICHELIN 205/55 R16 91V".into(),
            quantity: 2,
            unit_price: dec("81.90"),
        },
        RenderLine {
            description: "Montage equilibrage".into(),
            quantity: 2,
            unit_price: dec("15.00"),
        },
    ]);
    assert_eq!(totals.total_ttc, dec("193.80"));
    assert_eq!(totals.total_ht, dec("161.50"));
    assert_eq!(totals.total_tva, dec("32.30"));
}

#[test]
fn renderer_is_deterministic_across_pages() {
    // Enough lines to force pagination
    let lines: Vec<RenderLine> = (0..80)
        .map(|i| RenderLine {
            description: format!("Pneu TEST 205/55 R16 91V ligne {}", i),
            quantity: 1,
            unit_price: dec("50.00"),
        })
        .collect();
    let doc = document(lines);

    let a = render_invoice(&doc).unwrap();
    let b = render_invoice(&doc).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with(b"%PDF"));
}

#[test]
fn long_descriptions_are_wrapped_not_truncated() {
    let text = "Pneu AGRICOLE ALLIANCE FARMPRO 380/85 R28 133A8 tubeless renforce usage intensif";
    let rows = wrap_description(text, 48);
    assert!(rows.len() > 1);
    assert!(rows.iter().all(|r| r.len() <= 48));
    assert_eq!(
        rows.join(" "),
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    );
}

proptest! {
    /// HT + TVA always equals TTC, to the cent, for any line mix.
    #[test]
    fn totals_are_always_cent_exact(
        line_data in prop::collection::vec((1..50i32, 0..50_000i64), 1..20),
    ) {
        let lines: Vec<RenderLine> = line_data
            .iter()
            .map(|&(quantity, price_cents)| RenderLine {
                description: "ligne".into(),
                quantity,
                unit_price: Decimal::new(price_cents, 2),
            })
            .collect();

        let totals = compute_totals(&lines);
        prop_assert_eq!(totals.total_ht + totals.total_tva, totals.total_ttc);
        // Totals carry exactly two decimal places
        prop_assert_eq!(totals.total_ttc, totals.total_ttc.round_dp(2));
        prop_assert_eq!(totals.total_ht, totals.total_ht.round_dp(2));
    }

    /// Wrapping respects the width and preserves every word. Words are
    /// kept shorter than the width so no hard splits occur.
    #[test]
    fn wrapping_is_width_bounded(
        text in "[a-zA-Z0-9]{1,5}( [a-zA-Z0-9]{1,5}){0,30}",
        width in 6..60usize,
    ) {
        let rows = wrap_description(&text, width);
        prop_assert!(rows.iter().all(|r| r.len() <= width));
        let rejoined = rows.join(" ");
        let expected = text.split_whitespace().collect::<Vec<_>>().join(" ");
        prop_assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>().join(" "),
            expected
        );
    }
}
