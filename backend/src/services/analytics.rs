//! Read-only analytics over invoices and stock

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
}

/// Revenue aggregation bucket
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueBucket {
    Day,
    Week,
    #[default]
    Month,
}

impl RevenueBucket {
    /// date_trunc field name. Values are fixed here, never user input.
    fn as_sql(self) -> &'static str {
        match self {
            RevenueBucket::Day => "day",
            RevenueBucket::Week => "week",
            RevenueBucket::Month => "month",
        }
    }
}

/// One revenue bucket, tax included.
#[derive(Debug, Serialize, FromRow)]
pub struct RevenuePoint {
    pub period: DateTime<Utc>,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize)]
pub struct RevenueReport {
    pub points: Vec<RevenuePoint>,
    pub total: Decimal,
}

/// Units sold per tire dimension, best sellers first.
#[derive(Debug, Serialize, FromRow)]
pub struct DimensionSales {
    pub dimension: String,
    pub units_sold: i64,
}

/// Valuation of on-hand stock at weighted-average cost.
#[derive(Debug, Serialize, FromRow)]
pub struct StockValuation {
    pub total_units: i64,
    pub total_value: Decimal,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Invoiced revenue per period. Cancelled invoices are excluded.
    pub async fn revenue(&self, bucket: RevenueBucket) -> AppResult<RevenueReport> {
        let points = sqlx::query_as::<_, RevenuePoint>(&format!(
            r#"
            SELECT date_trunc('{}', created_at) AS period,
                   COALESCE(SUM(total_ttc), 0) AS revenue
            FROM invoices
            WHERE status <> 'cancelled'
            GROUP BY period
            ORDER BY period
            "#,
            bucket.as_sql()
        ))
        .fetch_all(&self.db)
        .await?;

        let total = points.iter().map(|p| p.revenue).sum();
        Ok(RevenueReport { points, total })
    }

    /// Ten best-selling dimensions by units across all invoices.
    pub async fn top_dimensions(&self) -> AppResult<Vec<DimensionSales>> {
        let rows = sqlx::query_as::<_, DimensionSales>(
            r#"
            SELECT a.dimension, SUM(l.quantity)::bigint AS units_sold
            FROM invoice_lines l
            JOIN articles a ON a.id = l.article_id
            GROUP BY a.dimension
            ORDER BY units_sold DESC, a.dimension
            LIMIT 10
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    /// Current stock valued at weighted-average cost.
    pub async fn stock_value(&self) -> AppResult<StockValuation> {
        let valuation = sqlx::query_as::<_, StockValuation>(
            r#"
            SELECT COALESCE(SUM(on_hand), 0)::bigint AS total_units,
                   COALESCE(SUM(on_hand * avg_cost), 0) AS total_value
            FROM articles
            WHERE on_hand > 0
            "#,
        )
        .fetch_one(&self.db)
        .await?;
        Ok(valuation)
    }
}
