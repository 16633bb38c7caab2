//! Stock validation rules.
//!
//! Resolves one item's inventory facts against a requested quantity into a
//! single prioritized status plus every applicable warning. Evaluation is
//! pure: the item is read-only and "today" arrives as a parameter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::stock::{StockItem, StockStatus};

/// Outcome of validating one requested quantity against one stock item.
///
/// `status` holds exactly one value even when several conditions match;
/// `warnings` carries one entry per matching condition, in precedence order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockValidationResult {
    pub is_available: bool,
    pub status: StockStatus,
    /// Hypothetical post-request quantity. Deducted only when the request
    /// is granted; a denied request leaves on-hand stock untouched.
    pub remaining_stock: u32,
    pub days_until_expiry: Option<i64>,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Future expiries within this many days raise the expiring-soon
    /// advisory. Expiry on or before today is handled by the expired rule.
    pub expiring_soon_window_days: i64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { expiring_soon_window_days: 90 }
    }
}

pub trait StockRuleEvaluator: Send + Sync {
    fn evaluate(
        &self,
        item: &StockItem,
        requested_quantity: u32,
        today: NaiveDate,
    ) -> StockValidationResult;
}

#[derive(Debug, Default)]
pub struct DeterministicStockRuleEvaluator {
    config: EvaluatorConfig,
}

impl DeterministicStockRuleEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self { config }
    }
}

impl StockRuleEvaluator for DeterministicStockRuleEvaluator {
    fn evaluate(
        &self,
        item: &StockItem,
        requested_quantity: u32,
        today: NaiveDate,
    ) -> StockValidationResult {
        evaluate_stock_request(item, requested_quantity, today, &self.config)
    }
}

/// Precedence order: inactive, expired, out-of-stock, insufficient,
/// expiring-soon, low-stock, available. Conditions are checked
/// independently; the first match sets `status`, every match appends its
/// warning.
pub fn evaluate_stock_request(
    item: &StockItem,
    requested_quantity: u32,
    today: NaiveDate,
    config: &EvaluatorConfig,
) -> StockValidationResult {
    let days_until_expiry = item.days_until_expiry(today);

    let inactive = !item.is_active;
    let expired = matches!(days_until_expiry, Some(days) if days <= 0);
    let out_of_stock = item.quantity_on_hand == 0;
    let insufficient = requested_quantity > item.quantity_on_hand;

    // A zero-quantity request is a pure availability probe: only blocking
    // conditions can change its outcome, advisories stay silent.
    let probing = requested_quantity == 0;
    let soon_days = if probing {
        None
    } else {
        days_until_expiry
            .filter(|days| *days > 0 && *days <= config.expiring_soon_window_days)
    };
    // Strictly below the minimum; landing exactly on it is still fine.
    // False when the request exceeds on-hand stock (the insufficient rule
    // owns that case) so the hypothetical remainder is always defined.
    let low_stock = !probing
        && requested_quantity <= item.quantity_on_hand
        && item.quantity_on_hand - requested_quantity < item.min_stock;

    let mut warnings = Vec::new();
    if inactive {
        warnings.push("Product is not active.".to_string());
    }
    if expired {
        warnings.push("Product has expired.".to_string());
    }
    if out_of_stock {
        warnings.push("Product is out of stock.".to_string());
    }
    if insufficient {
        warnings.push(format!(
            "Insufficient stock: requested {requested_quantity}, available {}.",
            item.quantity_on_hand
        ));
    }
    if let Some(days) = soon_days {
        warnings.push(format!("Product is expiring soon ({days} days)."));
    }
    if low_stock {
        warnings.push("Remaining stock will be below minimum level.".to_string());
    }

    let status = if inactive {
        StockStatus::Inactive
    } else if expired {
        StockStatus::Expired
    } else if out_of_stock {
        StockStatus::OutOfStock
    } else if insufficient {
        StockStatus::InsufficientStock
    } else if soon_days.is_some() {
        StockStatus::ExpiringSoon
    } else if low_stock {
        StockStatus::LowStock
    } else {
        StockStatus::Available
    };

    let remaining_stock = if status.is_blocking() {
        item.quantity_on_hand
    } else {
        item.quantity_on_hand - requested_quantity
    };

    StockValidationResult {
        is_available: !status.is_blocking(),
        status,
        remaining_stock,
        days_until_expiry,
        warnings,
    }
}
