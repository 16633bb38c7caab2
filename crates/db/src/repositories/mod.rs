use async_trait::async_trait;
use thiserror::Error;

use stocky_core::domain::stock::{ProductId, StockItem};

pub mod memory;
pub mod stock_item;

pub use memory::InMemoryStockItemRepository;
pub use stock_item::SqlStockItemRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Persistence contract for inventory records. The batch engine never talks
/// to this trait directly; both implementations also expose the narrower
/// `stocky_core::StockItemLookup` read seam.
#[async_trait]
pub trait StockItemRepository: Send + Sync {
    async fn find_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<StockItem>, RepositoryError>;

    async fn upsert(&self, item: StockItem) -> Result<(), RepositoryError>;

    async fn list_all(&self) -> Result<Vec<StockItem>, RepositoryError>;
}
