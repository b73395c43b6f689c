//! Error handling for the tire retailer back-office
//!
//! Provides consistent error responses in English and French

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
///
/// Parse failures are deliberately absent: a supplier line that does not
/// match the expected shape is a skipped row reported in the import counts,
/// never an error.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_fr: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Supplier document already imported: {0}")]
    DuplicateImport(String),

    #[error("Could not read supplier PDF: {0}")]
    PdfExtraction(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_fr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message_en: "Incorrect access code".to_string(),
                    message_fr: "Mot de passe incorrect".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message_en: "Invalid or expired session token".to_string(),
                    message_fr: "Session invalide ou expiree".to_string(),
                    field: None,
                },
            ),
            AppError::Validation {
                field,
                message,
                message_fr,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_fr: message_fr.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_fr: format!("{} introuvable", resource),
                    field: None,
                },
            ),
            AppError::InsufficientStock(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: msg.clone(),
                    message_fr: format!("Stock insuffisant : {}", msg),
                    field: None,
                },
            ),
            AppError::EmptyCart => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "EMPTY_CART".to_string(),
                    message_en: "The cart is empty".to_string(),
                    message_fr: "Le panier est vide".to_string(),
                    field: None,
                },
            ),
            AppError::DuplicateImport(name) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_IMPORT".to_string(),
                    message_en: format!(
                        "Document {} was already imported; re-importing would double-count stock",
                        name
                    ),
                    message_fr: format!("Le document {} a deja ete importe", name),
                    field: None,
                },
            ),
            AppError::PdfExtraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "PDF_EXTRACTION_ERROR".to_string(),
                    message_en: format!("Could not read supplier PDF: {}", msg),
                    message_fr: "Impossible de lire le PDF fournisseur".to_string(),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_fr: "Erreur de base de donnees".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_fr: "Erreur interne du serveur".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl AppError {
    /// Shorthand for a bilingual validation error.
    pub fn validation(field: &str, message: &str, message_fr: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_fr: message_fr.to_string(),
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
