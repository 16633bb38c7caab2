use crate::connection::DbPool;
use crate::repositories::RepositoryError;
use sqlx::Executor;

/// Canonical seed items for the deterministic stock-check scenarios covered
/// by demos and end-to-end tests.
const SEED_ITEMS: &[SeedStockItem] = &[
    SeedStockItem {
        product_id: "sku-dry-rice-25kg",
        scenario: "steady",
        quantity_on_hand: 240,
        min_stock: 40,
        max_stock: 600,
        expiry_date: None,
        is_active: true,
        description: "High-volume staple with healthy stock and no expiry",
    },
    SeedStockItem {
        product_id: "sku-olive-oil-1l",
        scenario: "reorder_edge",
        quantity_on_hand: 18,
        min_stock: 24,
        max_stock: 200,
        expiry_date: None,
        is_active: true,
        description: "Already below its minimum level, so any draw flags low stock",
    },
    SeedStockItem {
        product_id: "sku-espresso-beans-1kg",
        scenario: "out_of_stock",
        quantity_on_hand: 0,
        min_stock: 12,
        max_stock: 150,
        expiry_date: None,
        is_active: true,
        description: "Empty shelf awaiting replenishment",
    },
    SeedStockItem {
        product_id: "sku-uht-milk-6pk",
        scenario: "expired",
        quantity_on_hand: 72,
        min_stock: 20,
        max_stock: 160,
        expiry_date: Some("2024-11-30"),
        is_active: true,
        description: "Stock on hand but past its expiry date",
    },
    SeedStockItem {
        product_id: "sku-canned-tomato-12pk",
        scenario: "long_dated",
        quantity_on_hand: 96,
        min_stock: 30,
        max_stock: 320,
        expiry_date: Some("2099-12-31"),
        is_active: true,
        description: "Carries an expiry far outside any advisory window",
    },
    SeedStockItem {
        product_id: "sku-promo-hamper-2023",
        scenario: "inactive",
        quantity_on_hand: 55,
        min_stock: 5,
        max_stock: 80,
        expiry_date: Some("2023-12-24"),
        is_active: false,
        description: "Delisted seasonal bundle, blocked regardless of stock",
    },
];

/// Deterministic seed dataset covering every rule path of the stock-check
/// engine.
///
/// Provides fixtures for:
/// 1. Steady and reorder-edge stock levels
/// 2. Out-of-stock and expired items
/// 3. Long-dated and inactive items
pub struct StockSeedDataset;

impl StockSeedDataset {
    /// SQL fixture content for the stock seed data.
    pub const SQL: &str = include_str!("../../../config/fixtures/stock_seed_data.sql");

    /// Load the seed dataset into the database. Reloading is safe: every row
    /// upserts on `product_id`.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let items_seeded = SEED_ITEMS
            .iter()
            .map(|item| ItemSeedInfo {
                product_id: item.product_id,
                scenario: item.scenario,
                description: item.description,
            })
            .collect::<Vec<_>>();

        Ok(SeedResult { items_seeded })
    }

    /// Verify that seed data exists and matches the contract column for
    /// column.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        let quoted_ids = sql_array_from_ids(&seed_product_ids());
        let expected_total = SEED_ITEMS.len() as i64;
        let seeded_count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(1) FROM stock_item WHERE product_id IN {quoted_ids}"
        ))
        .fetch_one(pool)
        .await?;
        checks.push(("seeded-row-count", seeded_count == expected_total));

        for item in SEED_ITEMS {
            // `expiry_date IS ?5` so a NULL contract value matches a NULL
            // column.
            let row_matches: i64 = sqlx::query_scalar(
                "SELECT EXISTS(
                    SELECT 1 FROM stock_item
                    WHERE product_id = ?1
                      AND quantity_on_hand = ?2
                      AND min_stock = ?3
                      AND max_stock = ?4
                      AND expiry_date IS ?5
                      AND is_active = ?6
                 )",
            )
            .bind(item.product_id)
            .bind(i64::from(item.quantity_on_hand))
            .bind(i64::from(item.min_stock))
            .bind(i64::from(item.max_stock))
            .bind(item.expiry_date)
            .bind(item.is_active)
            .fetch_one(pool)
            .await?;
            checks.push((item.product_id, row_matches == 1));
        }

        let all_present = checks.iter().all(|(_, exists)| *exists);
        Ok(VerificationResult { all_present, checks })
    }

    /// Clean up seeded rows from a test database. Rows outside the seed
    /// contract are left alone.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let mut tx = pool.begin().await?;

        let quoted_ids = sql_array_from_ids(&seed_product_ids());
        sqlx::query(&format!("DELETE FROM stock_item WHERE product_id IN {quoted_ids}"))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedStockItem {
    product_id: &'static str,
    scenario: &'static str,
    quantity_on_hand: u32,
    min_stock: u32,
    max_stock: u32,
    expiry_date: Option<&'static str>,
    is_active: bool,
    description: &'static str,
}

fn seed_product_ids() -> Vec<&'static str> {
    SEED_ITEMS.iter().map(|item| item.product_id).collect()
}

fn sql_array_from_ids(ids: &[&str]) -> String {
    let quoted = ids.iter().map(|id| format!("'{}'", id)).collect::<Vec<_>>().join(",");
    format!("({quoted})")
}

#[derive(Debug)]
pub struct SeedResult {
    pub items_seeded: Vec<ItemSeedInfo>,
}

#[derive(Debug)]
pub struct ItemSeedInfo {
    pub product_id: &'static str,
    pub scenario: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
