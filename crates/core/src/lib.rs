pub mod batch;
pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rules;

pub use batch::{
    validate_requests, BatchError, BatchResult, BatchStockChecker, BatchSummary, CheckedItem,
    RawStockCheckRequest, StockCheckRequest, StockItemLookup,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    AppConfig, ConfigError, ConfigOverrides, DatabaseConfig, EngineConfig, LoadOptions, LogFormat,
    LoggingConfig,
};
pub use domain::stock::{ProductId, StockItem, StockStatus};
pub use errors::{RequestValidationError, StockLookupError};
pub use rules::{
    evaluate_stock_request, DeterministicStockRuleEvaluator, EvaluatorConfig, StockRuleEvaluator,
    StockValidationResult,
};
