use crate::commands::CommandResult;
use stocky_core::config::{AppConfig, LoadOptions};
use stocky_core::{
    validate_requests, BatchStockChecker, DeterministicStockRuleEvaluator, RawStockCheckRequest,
    SystemClock,
};
use stocky_db::connect;
use stocky_db::repositories::SqlStockItemRepository;

pub fn run(items: &[String]) -> CommandResult {
    let raw_requests = match parse_item_args(items) {
        Ok(raw_requests) => raw_requests,
        Err(message) => return CommandResult::failure("check", "usage", message, 2),
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "check",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let requests = match validate_requests(&raw_requests) {
        Ok(requests) => requests,
        Err(error) => {
            return CommandResult::failure("check", "request_validation", error.to_string(), 2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "check",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                1,
            );
        }
    };

    tracing::info!(
        event_name = "cli.check.started",
        request_count = requests.len(),
        "running batch stock check"
    );

    let result = runtime.block_on(async {
        let pool = connect(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 1u8))?;

        let checker = BatchStockChecker::new(
            SqlStockItemRepository::new(pool.clone()),
            DeterministicStockRuleEvaluator::with_config(config.engine.evaluator_config()),
            SystemClock,
        );
        let batch = checker.execute(&requests).await;

        pool.close().await;
        Ok::<_, (&'static str, String, u8)>(batch)
    });

    match result {
        Ok(batch) => {
            let summary = batch.summary.unwrap_or_default();
            tracing::info!(
                event_name = "cli.check.completed",
                success = batch.success,
                checked_items = summary.total_items,
                available_items = summary.available_items,
                unavailable_items = summary.unavailable_items,
                error_count = batch.errors.len(),
                "batch stock check finished"
            );

            match serde_json::to_string_pretty(&batch) {
                Ok(output) => {
                    CommandResult { exit_code: if batch.success { 0 } else { 1 }, output }
                }
                Err(error) => {
                    CommandResult::failure("check", "serialization", error.to_string(), 1)
                }
            }
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("check", error_class, message, exit_code)
        }
    }
}

fn parse_item_args(items: &[String]) -> Result<Vec<RawStockCheckRequest>, String> {
    if items.is_empty() {
        return Err("expected at least one PRODUCT_ID:QUANTITY argument".to_string());
    }

    items.iter().map(|spec| parse_item_spec(spec)).collect()
}

fn parse_item_spec(spec: &str) -> Result<RawStockCheckRequest, String> {
    // The quantity sits after the last colon, so product ids may carry
    // colons of their own.
    let (product_id, quantity) = spec
        .rsplit_once(':')
        .ok_or_else(|| format!("invalid item spec `{spec}`: expected PRODUCT_ID:QUANTITY"))?;

    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid quantity in `{spec}`: expected an integer"))?;

    Ok(RawStockCheckRequest { product_id: product_id.trim().to_string(), quantity })
}
