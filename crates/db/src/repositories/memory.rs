use std::collections::HashMap;

use tokio::sync::RwLock;

use stocky_core::domain::stock::{ProductId, StockItem};
use stocky_core::errors::StockLookupError;
use stocky_core::StockItemLookup;

use super::{RepositoryError, StockItemRepository};

/// Map-backed stand-in for the SQL store, for tests and ad-hoc wiring.
#[derive(Default)]
pub struct InMemoryStockItemRepository {
    items: RwLock<HashMap<String, StockItem>>,
}

impl InMemoryStockItemRepository {
    pub fn with_items(items: impl IntoIterator<Item = StockItem>) -> Self {
        let items =
            items.into_iter().map(|item| (item.product_id.0.clone(), item)).collect();
        Self { items: RwLock::new(items) }
    }
}

#[async_trait::async_trait]
impl StockItemRepository for InMemoryStockItemRepository {
    async fn find_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<StockItem>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items.get(&product_id.0).cloned())
    }

    async fn upsert(&self, item: StockItem) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        items.insert(item.product_id.0.clone(), item);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<StockItem>, RepositoryError> {
        let items = self.items.read().await;
        let mut all: Vec<StockItem> = items.values().cloned().collect();
        all.sort_by(|a, b| a.product_id.0.cmp(&b.product_id.0));
        Ok(all)
    }
}

#[async_trait::async_trait]
impl StockItemLookup for InMemoryStockItemRepository {
    async fn get_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<StockItem>, StockLookupError> {
        self.find_by_product_id(product_id)
            .await
            .map_err(|error| StockLookupError::backend(error.to_string()))
    }
}
