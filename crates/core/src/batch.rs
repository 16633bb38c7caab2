//! Batch stock checks.
//!
//! Evaluates an ordered list of (product id, quantity) requests: each
//! product is resolved through the injected lookup, run through the rule
//! evaluator with the injected clock's date, and collected back in request
//! order alongside an aggregate availability summary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::stock::{ProductId, StockItem};
use crate::errors::{RequestValidationError, StockLookupError};
use crate::rules::{StockRuleEvaluator, StockValidationResult};

/// One stock-check request after boundary validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheckRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Request shape as a transport hands it over: quantity still signed,
/// product id not yet checked for emptiness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStockCheckRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Validates a raw request list, reporting the first offending entry with
/// its position. Product ids are trimmed; blank ids and quantities outside
/// `0..=u32::MAX` are caller contract violations.
pub fn validate_requests(
    raw: &[RawStockCheckRequest],
) -> Result<Vec<StockCheckRequest>, RequestValidationError> {
    raw.iter().enumerate().map(|(index, entry)| validate_request(index, entry)).collect()
}

fn validate_request(
    index: usize,
    raw: &RawStockCheckRequest,
) -> Result<StockCheckRequest, RequestValidationError> {
    let product_id = raw.product_id.trim();
    if product_id.is_empty() {
        return Err(RequestValidationError::EmptyProductId { index });
    }

    if raw.quantity < 0 {
        return Err(RequestValidationError::NegativeQuantity {
            index,
            product_id: product_id.to_string(),
            quantity: raw.quantity,
        });
    }

    let quantity = u32::try_from(raw.quantity).map_err(|_| {
        RequestValidationError::QuantityTooLarge {
            index,
            product_id: product_id.to_string(),
            quantity: raw.quantity,
        }
    })?;

    Ok(StockCheckRequest { product_id: ProductId(product_id.to_string()), quantity })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedItem {
    pub product_id: ProductId,
    pub validation: StockValidationResult,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    pub product_id: ProductId,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_items: usize,
    pub available_items: usize,
    pub unavailable_items: usize,
}

/// Batch outcome. `success` stays true through item-level misses; it turns
/// false only when the lookup backend faults, in which case `items` is
/// empty, `errors` holds one synthetic entry and `summary` is `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: bool,
    pub items: Vec<CheckedItem>,
    pub errors: Vec<BatchError>,
    pub summary: Option<BatchSummary>,
}

/// Inventory lookup collaborator. `Ok(None)` is an ordinary miss recorded
/// in the batch's `errors`; `Err` is the unexpected-fault channel that
/// aborts the batch.
#[async_trait]
pub trait StockItemLookup: Send + Sync {
    async fn get_by_product_id(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<StockItem>, StockLookupError>;
}

pub struct BatchStockChecker<L, E, C> {
    lookup: L,
    evaluator: E,
    clock: C,
}

impl<L, E, C> BatchStockChecker<L, E, C> {
    pub fn new(lookup: L, evaluator: E, clock: C) -> Self {
        Self { lookup, evaluator, clock }
    }
}

impl<L, E, C> BatchStockChecker<L, E, C>
where
    L: StockItemLookup,
    E: StockRuleEvaluator,
    C: Clock,
{
    /// Runs the whole batch. Infallible by contract: item-level misses are
    /// data, and a backend fault is folded into the `success=false` shape
    /// rather than propagated.
    pub async fn execute(&self, requests: &[StockCheckRequest]) -> BatchResult {
        let today = self.clock.today();
        let mut items = Vec::with_capacity(requests.len());
        let mut errors = Vec::new();

        // Lookups are awaited in request order, which keeps `items` aligned
        // with input positions no matter how the backend schedules I/O.
        for request in requests {
            match self.lookup.get_by_product_id(&request.product_id).await {
                Ok(Some(item)) => {
                    let validation = self.evaluator.evaluate(&item, request.quantity, today);
                    items.push(CheckedItem {
                        product_id: request.product_id.clone(),
                        validation,
                    });
                }
                Ok(None) => {
                    errors.push(BatchError {
                        product_id: request.product_id.clone(),
                        message: "Product not found".to_string(),
                    });
                }
                Err(error) => {
                    return BatchResult {
                        success: false,
                        items: Vec::new(),
                        errors: vec![BatchError {
                            product_id: request.product_id.clone(),
                            message: format!("Unexpected error: {error}"),
                        }],
                        summary: None,
                    };
                }
            }
        }

        let summary = summarize(&items);
        BatchResult { success: true, items, errors, summary: Some(summary) }
    }
}

/// Counts are taken from resolved items only; unresolved products sit in
/// `errors` and are neither available nor unavailable.
fn summarize(items: &[CheckedItem]) -> BatchSummary {
    let available_items = items.iter().filter(|item| item.validation.is_available).count();
    BatchSummary {
        total_items: items.len(),
        available_items,
        unavailable_items: items.len() - available_items,
    }
}
