//! Client directory service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::models::Client;
use shared::validation::{validate_client_name, validate_postal_code};

use crate::error::{AppError, AppResult};

/// Client service
#[derive(Clone)]
pub struct ClientService {
    db: PgPool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClientPayload {
    #[validate(length(max = 200))]
    pub name: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    pub postal_code: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 30))]
    pub tax_id: Option<String>,
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

fn validate_payload(payload: &ClientPayload) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation("client", &e.to_string(), "Donnees client invalides"))?;
    validate_client_name(&payload.name)
        .map_err(|m| AppError::validation("name", m, "Nom du client obligatoire"))?;
    if let Some(code) = payload.postal_code.as_deref() {
        if !code.is_empty() {
            validate_postal_code(code)
                .map_err(|m| AppError::validation("postal_code", m, "Code postal invalide"))?;
        }
    }
    Ok(())
}

const CLIENT_COLUMNS: &str = "id, name, phone, address, postal_code, city, tax_id, created_at";

impl ClientService {
    /// Create a new ClientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List clients, optionally filtered by a name substring.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        let pattern = search
            .map(|s| format!("%{}%", s.trim()))
            .unwrap_or_else(|| "%".to_string());

        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE name ILIKE $1 ORDER BY name"
        ))
        .bind(&pattern)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Fetch one client by id.
    pub async fn get(&self, client_id: Uuid) -> AppResult<Client> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(client_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Client".to_string()))?;

        Ok(row.into())
    }

    /// Create a client.
    pub async fn create(&self, payload: ClientPayload) -> AppResult<Client> {
        validate_payload(&payload)?;

        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            INSERT INTO clients (name, phone, address, postal_code, city, tax_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(payload.name.trim())
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(&payload.postal_code)
        .bind(&payload.city)
        .bind(&payload.tax_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a client. Invoices reference clients by id, so history keeps
    /// pointing at the updated record.
    pub async fn update(&self, client_id: Uuid, payload: ClientPayload) -> AppResult<Client> {
        validate_payload(&payload)?;

        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            UPDATE clients
            SET name = $1, phone = $2, address = $3, postal_code = $4, city = $5, tax_id = $6
            WHERE id = $7
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(payload.name.trim())
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(&payload.postal_code)
        .bind(&payload.city)
        .bind(&payload.tax_id)
        .bind(client_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Client".to_string()))?;

        Ok(row.into())
    }
}
