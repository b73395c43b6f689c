//! Stock service: article lookup, movement history, and the purchase-side
//! reconciler applied to each imported supplier row.
//!
//! Import rows are applied sequentially: later rows for the same
//! (dimension, brand) pair must observe the running on-hand/cost totals
//! left by earlier rows, so rows are never processed concurrently.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{Article, StockMovement};
use shared::types::{MovementKind, Season};
use shared::validation::validate_sale_quantity;

use crate::error::{AppError, AppResult};
use crate::parser::CandidateRow;

/// Stock service
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Article search filter
#[derive(Debug, Default, serde::Deserialize)]
pub struct ArticleFilter {
    /// Substring match against dimension and brand
    pub search: Option<String>,
    pub season: Option<Season>,
    /// Only articles with on-hand stock (the default stock view)
    pub in_stock_only: Option<bool>,
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: Uuid,
    dimension: String,
    width: i32,
    height: i32,
    diameter: i32,
    load_index: String,
    speed_rating: String,
    season: String,
    brand: String,
    on_hand: i32,
    avg_cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            dimension: row.dimension,
            width: row.width,
            height: row.height,
            diameter: row.diameter,
            load_index: row.load_index,
            speed_rating: row.speed_rating,
            season: Season::from_db(&row.season),
            brand: row.brand,
            on_hand: row.on_hand,
            avg_cost: row.avg_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct MovementRow {
    id: Uuid,
    article_id: Uuid,
    kind: String,
    quantity: i32,
    unit_price: Option<Decimal>,
    reference: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MovementRow> for StockMovement {
    fn from(row: MovementRow) -> Self {
        StockMovement {
            id: row.id,
            article_id: row.article_id,
            kind: MovementKind::from_db(&row.kind),
            quantity: row.quantity,
            unit_price: row.unit_price,
            reference: row.reference,
            created_at: row.created_at,
        }
    }
}

/// Weighted-average cost update for a purchase.
///
/// Returns the new on-hand quantity and the new average cost. When the
/// resulting quantity is not positive the incoming price is used directly,
/// which also guards the division when prior stock was zero or negative.
pub fn apply_purchase(
    on_hand: i32,
    avg_cost: Decimal,
    quantity: i32,
    unit_price: Decimal,
) -> (i32, Decimal) {
    let new_on_hand = on_hand + quantity;
    let new_cost = if new_on_hand > 0 {
        (Decimal::from(on_hand) * avg_cost + Decimal::from(quantity) * unit_price)
            / Decimal::from(new_on_hand)
    } else {
        unit_price
    };
    (new_on_hand, new_cost)
}

/// Outcome of applying one sale line to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleApplication {
    pub new_on_hand: i32,
    /// Signed quantity for the Sale movement
    pub movement_quantity: i32,
    /// Weighted-average cost at the moment of sale, captured before the
    /// decrement and never recomputed afterwards
    pub cost_snapshot: Decimal,
}

/// Sale-side counterpart of [`apply_purchase`].
///
/// Validates the requested quantity against on-hand stock, then returns
/// the decremented quantity, the negative quantity to append as the Sale
/// movement, and the cost snapshot for the invoice line.
pub fn apply_sale(
    on_hand: i32,
    avg_cost: Decimal,
    quantity: i32,
) -> Result<SaleApplication, &'static str> {
    validate_sale_quantity(quantity, on_hand)?;
    Ok(SaleApplication {
        new_on_hand: on_hand - quantity,
        movement_quantity: -quantity,
        cost_snapshot: avg_cost,
    })
}

const ARTICLE_COLUMNS: &str = "id, dimension, width, height, diameter, load_index, speed_rating, \
                               season, brand, on_hand, avg_cost, created_at, updated_at";

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List articles, optionally filtered by search text, season, and
    /// stock availability.
    pub async fn list_articles(&self, filter: &ArticleFilter) -> AppResult<Vec<Article>> {
        let search = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", s.trim()))
            .unwrap_or_else(|| "%".to_string());
        let season = filter.season.map(|s| s.as_str().to_string());
        let in_stock_only = filter.in_stock_only.unwrap_or(true);

        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            WHERE (dimension ILIKE $1 OR brand ILIKE $1)
              AND ($2::text IS NULL OR season = $2)
              AND (NOT $3 OR on_hand > 0)
            ORDER BY dimension, brand
            "#
        ))
        .bind(&search)
        .bind(&season)
        .bind(in_stock_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Article::from).collect())
    }

    /// Fetch one article by id.
    pub async fn get_article(&self, article_id: Uuid) -> AppResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(article_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Article".to_string()))?;

        Ok(row.into())
    }

    /// Movement history, newest first.
    pub async fn list_movements(&self) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, article_id, kind, quantity, unit_price, reference, created_at
            FROM stock_movements
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StockMovement::from).collect())
    }

    /// Apply one imported purchase row: update or create the article keyed
    /// on (dimension, brand), and append the Purchase movement. Both writes
    /// commit in a single transaction.
    pub async fn record_purchase(
        &self,
        row: &CandidateRow,
        reference: &str,
    ) -> AppResult<Article> {
        let info = &row.dimension;
        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE dimension = $1 AND brand = $2 FOR UPDATE"
        ))
        .bind(&info.dimension)
        .bind(&info.brand)
        .fetch_optional(&mut *tx)
        .await?;

        let article: Article = match existing {
            Some(existing) => {
                let (on_hand, avg_cost) = apply_purchase(
                    existing.on_hand,
                    existing.avg_cost,
                    row.quantity,
                    row.unit_price,
                );
                sqlx::query_as::<_, ArticleRow>(&format!(
                    "UPDATE articles SET on_hand = $1, avg_cost = $2, updated_at = now() \
                     WHERE id = $3 RETURNING {ARTICLE_COLUMNS}"
                ))
                .bind(on_hand)
                .bind(avg_cost)
                .bind(existing.id)
                .fetch_one(&mut *tx)
                .await?
                .into()
            }
            None => sqlx::query_as::<_, ArticleRow>(&format!(
                r#"
                INSERT INTO articles (dimension, width, height, diameter, load_index,
                                      speed_rating, season, brand, on_hand, avg_cost)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING {ARTICLE_COLUMNS}
                "#
            ))
            .bind(&info.dimension)
            .bind(info.width.unwrap_or_default())
            .bind(info.height.unwrap_or_default())
            .bind(info.diameter.unwrap_or_default())
            .bind(&info.load_index)
            .bind(&info.speed_rating)
            .bind(info.season.as_str())
            .bind(&info.brand)
            .bind(row.quantity)
            .bind(row.unit_price)
            .fetch_one(&mut *tx)
            .await?
            .into(),
        };

        sqlx::query(
            r#"
            INSERT INTO stock_movements (article_id, kind, quantity, unit_price, reference)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(article.id)
        .bind(MovementKind::Purchase.as_str())
        .bind(row.quantity)
        .bind(row.unit_price)
        .bind(reference)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn weighted_average_worked_example() {
        // 10 units at 20.00 plus 5 at 26.00 -> 15 units at 22.00
        let (on_hand, cost) = apply_purchase(10, dec("20.00"), 5, dec("26.00"));
        assert_eq!(on_hand, 15);
        assert_eq!(cost, dec("22.00"));
    }

    #[test]
    fn fresh_article_takes_incoming_price() {
        let (on_hand, cost) = apply_purchase(0, Decimal::ZERO, 3, dec("15.00"));
        assert_eq!(on_hand, 3);
        assert_eq!(cost, dec("15.00"));
    }

    #[test]
    fn negative_prior_stock_guards_division() {
        // Prior stock driven negative by a correction; denominator is zero
        let (on_hand, cost) = apply_purchase(-2, dec("30.00"), 2, dec("40.00"));
        assert_eq!(on_hand, 0);
        assert_eq!(cost, dec("40.00"));
    }

    #[test]
    fn sale_worked_example() {
        // 4 on hand at 58.50, sell 2: stock drops to 2, the movement is
        // -2, and the snapshot is the pre-sale cost
        let sale = apply_sale(4, dec("58.50"), 2).unwrap();
        assert_eq!(sale.new_on_hand, 2);
        assert_eq!(sale.movement_quantity, -2);
        assert_eq!(sale.cost_snapshot, dec("58.50"));
    }

    #[test]
    fn sale_capped_by_on_hand() {
        assert!(apply_sale(4, dec("58.50"), 5).is_err());
        assert!(apply_sale(4, dec("58.50"), 0).is_err());
        assert!(apply_sale(0, dec("58.50"), 1).is_err());
    }

    #[test]
    fn double_application_is_stable_on_price() {
        let (q1, c1) = apply_purchase(0, Decimal::ZERO, 4, dec("58.50"));
        let (q2, c2) = apply_purchase(q1, c1, 4, dec("58.50"));
        assert_eq!(q2, 8);
        assert_eq!(c2, dec("58.50"));
    }
}
