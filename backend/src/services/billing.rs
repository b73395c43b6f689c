//! Billing service: cart line construction, checkout, invoice history,
//! and invoice PDF generation.
//!
//! Checkout persists the client (created on first use), the invoice
//! header, its lines, the stock decrements, and the Sale movements in one
//! database transaction: either the whole sale is recorded or none of it
//! is. Cost snapshots are read inside that transaction, so each invoice
//! line carries the weighted-average cost in effect at the moment of sale.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::models::{CartLine, Client, Invoice, InvoiceLine};
use shared::types::{InvoiceStatus, LineKind, MovementKind};
use shared::validation::{validate_client_name, validate_quantity, validate_sale_quantity, validate_unit_price};

use crate::config::CompanyConfig;
use crate::error::{AppError, AppResult};
use crate::render::{
    render_invoice, ClientBlock, CompanyIdentity, InvoiceDocument, RenderLine,
};
use crate::services::shop_services::ServiceCatalog;
use crate::services::stock::{apply_sale, StockService};

/// Billing service
#[derive(Clone)]
pub struct BillingService {
    db: PgPool,
}

/// Client selection at checkout: an existing id, or the fields of a client
/// to create on first use.
#[derive(Debug, Deserialize, Validate)]
pub struct ClientInput {
    pub id: Option<Uuid>,
    #[validate(length(max = 200))]
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub tax_id: Option<String>,
}

/// Checkout request body
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutInput {
    #[validate]
    pub client: ClientInput,
}

/// Invoice list entry with the client name joined in.
#[derive(Debug, serde::Serialize, FromRow)]
pub struct InvoiceSummary {
    pub id: Uuid,
    pub number: String,
    pub client_name: String,
    pub total_ttc: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: Uuid,
    number: String,
    client_id: Uuid,
    total_ttc: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: row.id,
            number: row.number,
            client_id: row.client_id,
            total_ttc: row.total_ttc,
            status: InvoiceStatus::from_db(&row.status),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceLineRow {
    id: Uuid,
    invoice_id: Uuid,
    article_id: Option<Uuid>,
    description: String,
    quantity: i32,
    unit_price: Decimal,
    cost_snapshot: Decimal,
}

impl From<InvoiceLineRow> for InvoiceLine {
    fn from(row: InvoiceLineRow) -> Self {
        InvoiceLine {
            id: row.id,
            invoice_id: row.invoice_id,
            article_id: row.article_id,
            description: row.description,
            quantity: row.quantity,
            unit_price: row.unit_price,
            cost_snapshot: row.cost_snapshot,
        }
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    address: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
    tax_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            phone: row.phone,
            address: row.address,
            postal_code: row.postal_code,
            city: row.city,
            tax_id: row.tax_id,
            created_at: row.created_at,
        }
    }
}

/// Invoice number generated from the creation timestamp, "FV-yyMM-HHmm".
pub fn invoice_number(at: DateTime<Utc>) -> String {
    format!("FV-{}", at.format("%y%m-%H%M"))
}

/// Normalize a submitted unit price to cents. Stored columns and the
/// rendered table both carry two decimal places; normalizing when the line
/// is built keeps the persisted header total equal to the sum of the
/// printed line totals.
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Cart total, tax included, rounded to the cent.
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.line_total())
        .sum::<Decimal>()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl BillingService {
    /// Create a new BillingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build a tire cart line, checking requested quantity against stock.
    pub async fn cart_tire_line(
        &self,
        article_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
    ) -> AppResult<CartLine> {
        validate_quantity(quantity)
            .map_err(|m| AppError::validation("quantity", m, "Quantite invalide"))?;
        validate_unit_price(unit_price)
            .map_err(|m| AppError::validation("unit_price", m, "Prix invalide"))?;
        let unit_price = round_price(unit_price);

        let article = StockService::new(self.db.clone())
            .get_article(article_id)
            .await?;
        validate_sale_quantity(quantity, article.on_hand).map_err(|_| {
            AppError::InsufficientStock(format!(
                "{} ({} on hand, {} requested)",
                article.sale_description(),
                article.on_hand,
                quantity
            ))
        })?;

        Ok(CartLine {
            kind: LineKind::Tire,
            article_id: Some(article.id),
            description: article.sale_description(),
            quantity,
            unit_price,
            cost_snapshot: article.avg_cost,
        })
    }

    /// Build a service cart line; unit price defaults to the catalog price.
    pub async fn cart_service_line(
        &self,
        service_id: Uuid,
        quantity: i32,
        unit_price: Option<Decimal>,
    ) -> AppResult<CartLine> {
        validate_quantity(quantity)
            .map_err(|m| AppError::validation("quantity", m, "Quantite invalide"))?;

        let service = ServiceCatalog::new(self.db.clone()).get(service_id).await?;
        let unit_price = unit_price.unwrap_or(service.unit_price);
        validate_unit_price(unit_price)
            .map_err(|m| AppError::validation("unit_price", m, "Prix invalide"))?;
        let unit_price = round_price(unit_price);

        Ok(CartLine {
            kind: LineKind::Service,
            article_id: None,
            description: service.description,
            quantity,
            unit_price,
            cost_snapshot: Decimal::ZERO,
        })
    }

    /// Commit the sale: client, header, lines, stock decrements, and Sale
    /// movements in a single transaction.
    pub async fn checkout(
        &self,
        lines: Vec<CartLine>,
        input: CheckoutInput,
        now: DateTime<Utc>,
    ) -> AppResult<Invoice> {
        if lines.is_empty() {
            return Err(AppError::EmptyCart);
        }
        input.validate().map_err(|e| {
            AppError::validation("client", &e.to_string(), "Donnees client invalides")
        })?;
        if input.client.id.is_none() {
            validate_client_name(&input.client.name)
                .map_err(|m| AppError::validation("name", m, "Nom du client obligatoire"))?;
        }

        let mut tx = self.db.begin().await?;

        let client_id = match input.client.id {
            Some(id) => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
                if !exists {
                    return Err(AppError::NotFound("Client".to_string()));
                }
                id
            }
            None => {
                sqlx::query_scalar::<_, Uuid>(
                    r#"
                    INSERT INTO clients (name, phone, address, postal_code, city, tax_id)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id
                    "#,
                )
                .bind(input.client.name.trim())
                .bind(&input.client.phone)
                .bind(&input.client.address)
                .bind(&input.client.postal_code)
                .bind(&input.client.city)
                .bind(&input.client.tax_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let number = invoice_number(now);
        let total = cart_total(&lines);

        let invoice: Invoice = sqlx::query_as::<_, InvoiceRow>(
            r#"
            INSERT INTO invoices (number, client_id, total_ttc, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, number, client_id, total_ttc, status, created_at
            "#,
        )
        .bind(&number)
        .bind(client_id)
        .bind(total)
        .bind(InvoiceStatus::Paid.as_str())
        .fetch_one(&mut *tx)
        .await?
        .into();

        for line in &lines {
            let cost_snapshot = match line.kind {
                LineKind::Tire => {
                    let article_id = line.article_id.ok_or_else(|| {
                        AppError::validation(
                            "article_id",
                            "Tire line is missing its article",
                            "Ligne pneu sans article",
                        )
                    })?;

                    let (on_hand, avg_cost) = sqlx::query_as::<_, (i32, Decimal)>(
                        "SELECT on_hand, avg_cost FROM articles WHERE id = $1 FOR UPDATE",
                    )
                    .bind(article_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Article".to_string()))?;

                    let sale = apply_sale(on_hand, avg_cost, line.quantity).map_err(|_| {
                        AppError::InsufficientStock(format!(
                            "{} ({} on hand, {} requested)",
                            line.description, on_hand, line.quantity
                        ))
                    })?;

                    sqlx::query(
                        "UPDATE articles SET on_hand = $1, updated_at = now() WHERE id = $2",
                    )
                    .bind(sale.new_on_hand)
                    .bind(article_id)
                    .execute(&mut *tx)
                    .await?;

                    sqlx::query(
                        r#"
                        INSERT INTO stock_movements (article_id, kind, quantity, reference)
                        VALUES ($1, $2, $3, $4)
                        "#,
                    )
                    .bind(article_id)
                    .bind(MovementKind::Sale.as_str())
                    .bind(sale.movement_quantity)
                    .bind(format!("Vente {}", number))
                    .execute(&mut *tx)
                    .await?;

                    sale.cost_snapshot
                }
                LineKind::Service => Decimal::ZERO,
            };

            sqlx::query(
                r#"
                INSERT INTO invoice_lines (invoice_id, article_id, description,
                                           quantity, unit_price, cost_snapshot)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(invoice.id)
            .bind(line.article_id)
            .bind(&line.description)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(cost_snapshot)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(invoice)
    }

    /// Invoice history, newest first.
    pub async fn list_invoices(&self) -> AppResult<Vec<InvoiceSummary>> {
        let summaries = sqlx::query_as::<_, InvoiceSummary>(
            r#"
            SELECT i.id, i.number, c.name AS client_name, i.total_ttc, i.status, i.created_at
            FROM invoices i
            JOIN clients c ON c.id = i.client_id
            ORDER BY i.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(summaries)
    }

    /// Load one invoice with its client and lines.
    pub async fn get_invoice(
        &self,
        invoice_id: Uuid,
    ) -> AppResult<(Invoice, Client, Vec<InvoiceLine>)> {
        let invoice: Invoice = sqlx::query_as::<_, InvoiceRow>(
            "SELECT id, number, client_id, total_ttc, status, created_at \
             FROM invoices WHERE id = $1",
        )
        .bind(invoice_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice".to_string()))?
        .into();

        let client: Client = sqlx::query_as::<_, ClientRow>(
            "SELECT id, name, phone, address, postal_code, city, tax_id, created_at \
             FROM clients WHERE id = $1",
        )
        .bind(invoice.client_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Client".to_string()))?
        .into();

        let lines = sqlx::query_as::<_, InvoiceLineRow>(
            r#"
            SELECT id, invoice_id, article_id, description, quantity, unit_price, cost_snapshot
            FROM invoice_lines
            WHERE invoice_id = $1
            ORDER BY id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.db)
        .await?;

        Ok((
            invoice,
            client,
            lines.into_iter().map(InvoiceLine::from).collect(),
        ))
    }

    /// Render the invoice PDF from persisted data. Re-prints reconstruct
    /// identical totals because the lines themselves are the source of
    /// truth.
    pub async fn invoice_pdf(
        &self,
        invoice_id: Uuid,
        company: &CompanyConfig,
    ) -> AppResult<(Invoice, Vec<u8>)> {
        let (invoice, client, lines) = self.get_invoice(invoice_id).await?;

        let document = InvoiceDocument {
            company: CompanyIdentity {
                name: company.name.clone(),
                address: company.address.clone(),
                siret: company.siret.clone(),
                payment_terms: company.payment_terms.clone(),
            },
            client: ClientBlock {
                name: client.name,
                address: client.address,
                postal_code: client.postal_code,
                city: client.city,
                tax_id: client.tax_id,
            },
            lines: lines
                .iter()
                .map(|l| RenderLine {
                    description: l.description.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
            number: invoice.number.clone(),
            issue_date: invoice.created_at.date_naive(),
        };

        let bytes = render_invoice(&document)?;
        Ok((invoice, bytes))
    }
}
