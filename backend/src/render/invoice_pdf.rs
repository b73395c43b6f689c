//! Sales invoice PDF renderer
//!
//! Pure function of its inputs: identical `InvoiceDocument` values produce
//! byte-identical PDFs. The issue date is an explicit input, never sampled
//! here. Layout is a fixed A4 page: issuer block, invoice number and date,
//! client block, line table with per-line HT/TTC amounts, totals block,
//! payment terms, legal footer.
//!
//! Stored unit prices are tax-inclusive; pre-tax amounts are back-computed
//! by dividing by (1 + VAT rate), with the rate fixed at 20%.

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed VAT rate (20%)
const VAT_RATE_PERCENT: i64 = 20;

/// Maximum description characters per table row before wrapping
const WRAP_WIDTH: usize = 48;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 14.0;
/// Below this y the table breaks to a new page
const TABLE_FLOOR: f32 = 120.0;

/// Issuer identity printed on every invoice
#[derive(Debug, Clone)]
pub struct CompanyIdentity {
    pub name: String,
    pub address: String,
    pub siret: String,
    pub payment_terms: String,
}

/// Client block fields
#[derive(Debug, Clone)]
pub struct ClientBlock {
    pub name: String,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub tax_id: Option<String>,
}

/// One line of the invoice table. `unit_price` is tax-inclusive.
#[derive(Debug, Clone)]
pub struct RenderLine {
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Complete renderer input
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub company: CompanyIdentity,
    pub client: ClientBlock,
    pub lines: Vec<RenderLine>,
    pub number: String,
    pub issue_date: NaiveDate,
}

/// Cent-exact invoice totals. By construction
/// `total_ht + total_tva == total_ttc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub total_ht: Decimal,
    pub total_tva: Decimal,
    pub total_ttc: Decimal,
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn vat_divisor() -> Decimal {
    Decimal::ONE + Decimal::new(VAT_RATE_PERCENT, 2)
}

/// Tax-inclusive amount of one line, rounded to the cent.
pub fn line_ttc(line: &RenderLine) -> Decimal {
    round_cents(line.unit_price * Decimal::from(line.quantity))
}

/// Pre-tax amount of one line, back-computed from the TTC amount.
pub fn line_ht(line: &RenderLine) -> Decimal {
    round_cents(line_ttc(line) / vat_divisor())
}

/// Compute invoice totals from the line list.
///
/// Totals are sums of the already-rounded per-line amounts, so they agree
/// with the printed table to the cent, and TVA is the exact difference.
pub fn compute_totals(lines: &[RenderLine]) -> InvoiceTotals {
    let total_ttc: Decimal = lines.iter().map(line_ttc).sum();
    let total_ht: Decimal = lines.iter().map(line_ht).sum();
    InvoiceTotals {
        total_ht,
        total_tva: total_ttc - total_ht,
        total_ttc,
    }
}

/// Wrap a description at `width` characters, breaking on whitespace where
/// possible. Text is never truncated: a single token longer than the width
/// is split hard.
pub fn wrap_description(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        // Hard-split tokens that alone exceed the width
        while word.len() > width {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            let (head, tail) = word.split_at(width);
            rows.push(head.to_string());
            word = tail;
        }
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}

/// Accumulates content-stream operations for one page.
struct PageBuilder {
    ops: Vec<Operation>,
    y: f32,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn text(&mut self, font: &str, size: i64, x: f32, y: f32, s: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops
            .push(Operation::new("Tj", vec![Object::string_literal(s)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn hline(&mut self, x1: f32, x2: f32, y: f32) {
        self.ops.push(Operation::new("m", vec![x1.into(), y.into()]));
        self.ops.push(Operation::new("l", vec![x2.into(), y.into()]));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), w.into(), h.into()],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }
}

/// Render the invoice to PDF bytes.
pub fn render_invoice(doc: &InvoiceDocument) -> anyhow::Result<Vec<u8>> {
    let totals = compute_totals(&doc.lines);
    let mut pages: Vec<PageBuilder> = Vec::new();

    // First page: header blocks
    let mut page = PageBuilder::new();
    draw_header(&mut page, doc);
    draw_table_header(&mut page, PAGE_HEIGHT - 250.0);
    page.y = PAGE_HEIGHT - 270.0;

    // Line table, breaking to fresh pages as needed
    for line in &doc.lines {
        let rows = wrap_description(&line.description, WRAP_WIDTH);
        let needed = rows.len() as f32 * LINE_HEIGHT;
        if page.y - needed < TABLE_FLOOR {
            pages.push(page);
            page = PageBuilder::new();
            let top = page.y;
            draw_table_header(&mut page, top);
            page.y -= 20.0;
        }
        for (i, row) in rows.iter().enumerate() {
            page.text("F1", 10, MARGIN, page.y, row);
            if i == 0 {
                page.text("F1", 10, 320.0, page.y, &line.quantity.to_string());
                page.text("F1", 10, 360.0, page.y, &money(line.unit_price));
                page.text("F1", 10, 430.0, page.y, &money(line_ht(line)));
                page.text("F1", 10, 500.0, page.y, &money(line_ttc(line)));
            }
            page.y -= LINE_HEIGHT;
        }
    }

    // Totals, payment terms, legal footer on the last page
    if page.y - 90.0 < TABLE_FLOOR {
        pages.push(page);
        page = PageBuilder::new();
    }
    draw_totals(&mut page, doc, &totals);
    draw_footer(&mut page, doc);
    pages.push(page);

    build_document(pages)
}

fn draw_header(page: &mut PageBuilder, doc: &InvoiceDocument) {
    let h = PAGE_HEIGHT;
    let company = &doc.company;

    page.text("F2", 16, MARGIN, h - 50.0, &company.name);
    page.text("F1", 10, MARGIN, h - 70.0, &company.address);
    page.text("F1", 10, MARGIN, h - 85.0, &format!("SIRET: {}", company.siret));

    page.text("F2", 14, 400.0, h - 50.0, "FACTURE");
    page.text("F1", 12, 400.0, h - 70.0, &format!("N {}", doc.number));
    page.text(
        "F1",
        12,
        400.0,
        h - 90.0,
        &format!("Date : {}", doc.issue_date.format("%d/%m/%Y")),
    );

    // Client block
    let client = &doc.client;
    page.rect(300.0, h - 200.0, 250.0, 80.0);
    page.text("F2", 12, 310.0, h - 135.0, &format!("Client : {}", client.name));
    if let Some(address) = &client.address {
        page.text("F1", 10, 310.0, h - 150.0, address);
    }
    let locality = match (&client.postal_code, &client.city) {
        (Some(cp), Some(city)) => Some(format!("{} {}", cp, city)),
        (None, Some(city)) => Some(city.clone()),
        (Some(cp), None) => Some(cp.clone()),
        (None, None) => None,
    };
    if let Some(locality) = locality {
        page.text("F1", 10, 310.0, h - 165.0, &locality);
    }
    if let Some(tax_id) = &client.tax_id {
        page.text("F1", 10, 310.0, h - 185.0, &format!("SIRET: {}", tax_id));
    }
}

fn draw_table_header(page: &mut PageBuilder, y: f32) {
    page.hline(MARGIN, PAGE_WIDTH - MARGIN, y);
    page.text("F2", 10, MARGIN, y + 5.0, "Description");
    page.text("F2", 10, 320.0, y + 5.0, "Qte");
    page.text("F2", 10, 360.0, y + 5.0, "P.U. TTC");
    page.text("F2", 10, 430.0, y + 5.0, "Total HT");
    page.text("F2", 10, 500.0, y + 5.0, "Total TTC");
    page.hline(MARGIN, PAGE_WIDTH - MARGIN, y - 4.0);
}

fn draw_totals(page: &mut PageBuilder, doc: &InvoiceDocument, totals: &InvoiceTotals) {
    let y = page.y - 10.0;
    page.hline(300.0, PAGE_WIDTH - MARGIN, y);
    page.text("F1", 11, 360.0, y - 18.0, "Total HT :");
    page.text("F1", 11, 480.0, y - 18.0, &money(totals.total_ht));
    page.text(
        "F1",
        11,
        360.0,
        y - 34.0,
        &format!("Total TVA ({}%) :", VAT_RATE_PERCENT),
    );
    page.text("F1", 11, 480.0, y - 34.0, &money(totals.total_tva));
    page.text("F2", 12, 360.0, y - 52.0, "Total TTC :");
    page.text("F2", 12, 480.0, y - 52.0, &money(totals.total_ttc));

    page.text("F1", 9, MARGIN, y - 80.0, &doc.company.payment_terms);
    page.y = y - 80.0;
}

fn draw_footer(page: &mut PageBuilder, doc: &InvoiceDocument) {
    let company = &doc.company;
    page.hline(MARGIN, PAGE_WIDTH - MARGIN, 60.0);
    page.text(
        "F1",
        8,
        MARGIN,
        48.0,
        &format!(
            "{} - {} - SIRET {}",
            company.name, company.address, company.siret
        ),
    );
    page.text("F1", 8, MARGIN, 38.0, "TVA non percue en sus des prix indiques.");
}

/// Assemble the accumulated pages into a PDF document.
fn build_document(pages: Vec<PageBuilder>) -> anyhow::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    let page_count = pages.len();
    for page in pages {
        let content = Content { operations: page.ops };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_doc() -> InvoiceDocument {
        InvoiceDocument {
            company: CompanyIdentity {
                name: "JUBAPNEU".into(),
                address: "123 Route du Garage, 57000 METZ".into(),
                siret: "123 456 789 00012".into(),
                payment_terms: "Paiement a reception de facture".into(),
            },
            client: ClientBlock {
                name: "Garage Dupont".into(),
                address: Some("4 rue des Lilas".into()),
                postal_code: Some("57000".into()),
                city: Some("METZ".into()),
                tax_id: None,
            },
            lines: vec![
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
            ],
            number: "FV-2406-1432".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        }
    }

    #[test]
    fn totals_are_cent_exact() {
        let totals = compute_totals(&sample_doc().lines);
        assert_eq!(totals.total_ht + totals.total_tva, totals.total_ttc);
        assert_eq!(totals.total_ttc, dec("193.80"));
    }

    #[test]
    fn renders_byte_identical_output() {
        let doc = sample_doc();
        let a = render_invoice(&doc).unwrap();
        let b = render_invoice(&doc).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with(b"%PDF"));
    }

    #[test]
    fn wrapping_never_truncates() {
        let text = "Pneu AGRICOLE longue designation avec beaucoup de texte descriptif";
        let rows = wrap_description(text, 20);
        assert!(rows.iter().all(|r| r.len() <= 20));
        let rejoined = rows.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>().join(" "),
            text
        );
    }
}
