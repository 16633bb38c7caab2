use thiserror::Error;

/// Caller contract violations, rejected at the raw request boundary
/// before anything reaches the evaluator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("request {index}: product id must not be empty")]
    EmptyProductId { index: usize },
    #[error("request {index}: quantity {quantity} for product `{product_id}` must be non-negative")]
    NegativeQuantity { index: usize, product_id: String, quantity: i64 },
    #[error("request {index}: quantity {quantity} for product `{product_id}` exceeds the supported range")]
    QuantityTooLarge { index: usize, product_id: String, quantity: i64 },
}

/// Fault channel of the inventory lookup collaborator. A lookup miss is
/// `Ok(None)` on the lookup trait, never an error; this type covers only
/// unexpected backend faults. Infrastructure detail is flattened to a
/// reason string so the core stays free of storage crates.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StockLookupError {
    #[error("stock lookup backend failure: {reason}")]
    Backend { reason: String },
}

impl StockLookupError {
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestValidationError, StockLookupError};

    #[test]
    fn negative_quantity_message_names_product_and_position() {
        let error = RequestValidationError::NegativeQuantity {
            index: 2,
            product_id: "sku-apple".to_string(),
            quantity: -5,
        };
        assert_eq!(
            error.to_string(),
            "request 2: quantity -5 for product `sku-apple` must be non-negative"
        );
    }

    #[test]
    fn empty_product_id_message_names_position() {
        let error = RequestValidationError::EmptyProductId { index: 0 };
        assert_eq!(error.to_string(), "request 0: product id must not be empty");
    }

    #[test]
    fn lookup_error_carries_backend_reason() {
        let error = StockLookupError::backend("connection reset");
        assert_eq!(error.to_string(), "stock lookup backend failure: connection reset");
    }
}
