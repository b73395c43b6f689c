//! Generated document rendering

pub mod invoice_pdf;

pub use invoice_pdf::{
    compute_totals, render_invoice, wrap_description, ClientBlock, CompanyIdentity,
    InvoiceDocument, InvoiceTotals, RenderLine,
};
