use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One product's inventory snapshot as read from the inventory store.
///
/// The engine only reads these; any deduction it reports is hypothetical.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub product_id: ProductId,
    pub quantity_on_hand: u32,
    pub min_stock: u32,
    /// Informational capacity bound; never enforced during evaluation.
    pub max_stock: u32,
    /// `None` means the product does not expire.
    pub expiry_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl StockItem {
    /// Days between `today` and the expiry date, at date granularity.
    /// Negative once expired; `None` when the item carries no expiry.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|expiry| (expiry - today).num_days())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Inactive,
    Expired,
    OutOfStock,
    InsufficientStock,
    ExpiringSoon,
    LowStock,
    Available,
}

impl StockStatus {
    /// Blocking statuses deny the request outright; the rest grant it
    /// (possibly with warnings attached).
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            StockStatus::Inactive
                | StockStatus::Expired
                | StockStatus::OutOfStock
                | StockStatus::InsufficientStock
        )
    }
}
