//! HTTP handlers for the cart, checkout, and invoice history

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{CartLine, Client, Invoice, InvoiceLine};

use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::billing::{cart_total, BillingService, CheckoutInput, InvoiceSummary};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddTireLineRequest {
    pub article_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct AddServiceLineRequest {
    pub service_id: Uuid,
    pub quantity: i32,
    /// Overrides the catalog price when present
    pub unit_price: Option<Decimal>,
}

/// Cart contents with the running total
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_ttc: Decimal,
}

/// Invoice detail: header, client, and lines
#[derive(Debug, Serialize)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub client: Client,
    pub lines: Vec<InvoiceLine>,
}

/// Current cart contents
pub async fn get_cart(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Json<CartView>> {
    let lines = state.carts.lines(session.0.session_id).await;
    let total_ttc = cart_total(&lines);
    Ok(Json(CartView { lines, total_ttc }))
}

/// Add a tire line to the cart
pub async fn add_tire_line(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<AddTireLineRequest>,
) -> AppResult<Json<CartView>> {
    let service = BillingService::new(state.db);
    let line = service
        .cart_tire_line(request.article_id, request.quantity, request.unit_price)
        .await?;

    state.carts.add(session.0.session_id, line).await;
    let lines = state.carts.lines(session.0.session_id).await;
    let total_ttc = cart_total(&lines);
    Ok(Json(CartView { lines, total_ttc }))
}

/// Add a workshop service line to the cart
pub async fn add_service_line(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<AddServiceLineRequest>,
) -> AppResult<Json<CartView>> {
    let service = BillingService::new(state.db);
    let line = service
        .cart_service_line(request.service_id, request.quantity, request.unit_price)
        .await?;

    state.carts.add(session.0.session_id, line).await;
    let lines = state.carts.lines(session.0.session_id).await;
    let total_ttc = cart_total(&lines);
    Ok(Json(CartView { lines, total_ttc }))
}

/// Empty the cart
pub async fn clear_cart(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Json<()>> {
    state.carts.clear(session.0.session_id).await;
    Ok(Json(()))
}

/// Turn the cart into an invoice. The cart is cleared only after the sale
/// committed, so a rejected checkout leaves it editable.
pub async fn checkout(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(input): Json<CheckoutInput>,
) -> AppResult<Json<Invoice>> {
    let lines = state.carts.lines(session.0.session_id).await;
    let service = BillingService::new(state.db);
    let invoice = service.checkout(lines, input, Utc::now()).await?;
    state.carts.clear(session.0.session_id).await;
    Ok(Json(invoice))
}

/// Invoice history, newest first
pub async fn list_invoices(State(state): State<AppState>) -> AppResult<Json<Vec<InvoiceSummary>>> {
    let service = BillingService::new(state.db);
    let summaries = service.list_invoices().await?;
    Ok(Json(summaries))
}

/// One invoice with its client and lines
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> AppResult<Json<InvoiceDetail>> {
    let service = BillingService::new(state.db);
    let (invoice, client, lines) = service.get_invoice(invoice_id).await?;
    Ok(Json(InvoiceDetail {
        invoice,
        client,
        lines,
    }))
}

/// Download the invoice PDF, regenerated from persisted lines
pub async fn invoice_pdf(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> AppResult<Response> {
    let service = BillingService::new(state.db);
    let (invoice, bytes) = service
        .invoice_pdf(invoice_id, &state.config.company)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.pdf\"", invoice.number),
        ),
    ];
    Ok((headers, bytes).into_response())
}
