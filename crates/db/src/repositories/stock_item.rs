use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use stocky_core::domain::stock::{ProductId, StockItem};
use stocky_core::errors::StockLookupError;
use stocky_core::StockItemLookup;

use super::{RepositoryError, StockItemRepository};
use crate::DbPool;

/// SQLite-backed inventory store. Dates are persisted as ISO `YYYY-MM-DD`
/// text and quantities as INTEGER, re-narrowed to `u32` on read.
pub struct SqlStockItemRepository {
    pool: DbPool,
}

impl SqlStockItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl StockItemRepository for SqlStockItemRepository {
    async fn find_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<StockItem>, RepositoryError> {
        let row = sqlx::query(
            "SELECT
                product_id,
                quantity_on_hand,
                min_stock,
                max_stock,
                expiry_date,
                is_active
             FROM stock_item
             WHERE product_id = ?",
        )
        .bind(&product_id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(item_from_row).transpose()
    }

    async fn upsert(&self, item: StockItem) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO stock_item (
                product_id,
                quantity_on_hand,
                min_stock,
                max_stock,
                expiry_date,
                is_active,
                updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, datetime('now'))
             ON CONFLICT(product_id) DO UPDATE SET
                quantity_on_hand = excluded.quantity_on_hand,
                min_stock = excluded.min_stock,
                max_stock = excluded.max_stock,
                expiry_date = excluded.expiry_date,
                is_active = excluded.is_active,
                updated_at = excluded.updated_at",
        )
        .bind(&item.product_id.0)
        .bind(i64::from(item.quantity_on_hand))
        .bind(i64::from(item.min_stock))
        .bind(i64::from(item.max_stock))
        .bind(item.expiry_date.map(|date| date.to_string()))
        .bind(item.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<StockItem>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT
                product_id,
                quantity_on_hand,
                min_stock,
                max_stock,
                expiry_date,
                is_active
             FROM stock_item
             ORDER BY product_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(item_from_row).collect()
    }
}

/// The production lookup collaborator for batch checks. Storage failures
/// are flattened to the core's backend-fault channel.
#[async_trait::async_trait]
impl StockItemLookup for SqlStockItemRepository {
    async fn get_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<StockItem>, StockLookupError> {
        self.find_by_product_id(product_id)
            .await
            .map_err(|error| StockLookupError::backend(error.to_string()))
    }
}

fn item_from_row(row: SqliteRow) -> Result<StockItem, RepositoryError> {
    Ok(StockItem {
        product_id: ProductId(row.try_get("product_id")?),
        quantity_on_hand: parse_quantity("quantity_on_hand", row.try_get("quantity_on_hand")?)?,
        min_stock: parse_quantity("min_stock", row.try_get("min_stock")?)?,
        max_stock: parse_quantity("max_stock", row.try_get("max_stock")?)?,
        expiry_date: parse_expiry_date(row.try_get("expiry_date")?)?,
        is_active: row.try_get("is_active")?,
    })
}

fn parse_quantity(column: &str, value: i64) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|_| {
        RepositoryError::Decode(format!(
            "invalid value for `{column}` (expected non-negative u32): {value}"
        ))
    })
}

fn parse_expiry_date(value: Option<String>) -> Result<Option<NaiveDate>, RepositoryError> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|error| {
                RepositoryError::Decode(format!("invalid expiry_date `{raw}`: {error}"))
            })
        })
        .transpose()
}
