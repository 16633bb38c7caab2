use crate::commands::CommandResult;
use stocky_core::config::{AppConfig, LoadOptions};
use stocky_db::{connect, migrations, StockSeedDataset};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                1,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 1u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 1u8))?;

        let seed_result = StockSeedDataset::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 1u8))?;

        let verification = StockSeedDataset::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 1u8))?;

        let run_result: Result<SeedOutput, (&'static str, String, u8)> =
            if !verification.all_present {
                let failed_checks = verification
                    .checks
                    .iter()
                    .filter_map(|(check, passed)| (!passed).then_some(*check))
                    .collect::<Vec<_>>();
                let message = if failed_checks.is_empty() {
                    "Some seed data failed to load".to_string()
                } else {
                    format!("Seed verification failed for checks: {}", failed_checks.join(", "))
                };
                Err(("seed_verification", message, 1u8))
            } else {
                Ok(SeedOutput { items: seed_result.items_seeded })
            };

        pool.close().await;
        run_result
    });

    match result {
        Ok(output) => {
            let item_descriptions: Vec<String> = output
                .items
                .iter()
                .map(|item| format!("  - {}: {} ({})", item.scenario, item.product_id, item.description))
                .collect();
            let message = format!(
                "stock seed dataset loaded for {} deterministic scenarios:\n{}",
                output.items.len(),
                item_descriptions.join("\n")
            );
            tracing::info!(
                event_name = "cli.seed.completed",
                items_seeded = output.items.len(),
                "stock seed dataset loaded"
            );
            CommandResult::success("seed", message)
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

struct SeedOutput {
    items: Vec<stocky_db::ItemSeedInfo>,
}

#[cfg(test)]
mod tests {
    #[test]
    fn verification_error_message_targets_failed_checks() {
        let checks = [
            ("seeded-row-count", true),
            ("sku-olive-oil-1l", false),
            ("sku-promo-hamper-2023", false),
        ];

        let failed_checks = checks
            .iter()
            .filter_map(|(check, passed)| (!passed).then_some(*check))
            .collect::<Vec<_>>();

        let message = if failed_checks.is_empty() {
            "Some seed data failed to load".to_string()
        } else {
            format!("Seed verification failed for checks: {}", failed_checks.join(", "))
        };

        assert_eq!(
            message,
            "Seed verification failed for checks: sku-olive-oil-1l, sku-promo-hamper-2023"
        );
    }

    #[test]
    fn verification_error_message_falls_back_to_generic_when_no_labels() {
        let checks = [("seeded-row-count", true), ("sku-dry-rice-25kg", true)];

        let failed_checks = checks
            .iter()
            .filter_map(|(check, passed)| (!passed).then_some(*check))
            .collect::<Vec<_>>();
        let message = if failed_checks.is_empty() {
            "Some seed data failed to load".to_string()
        } else {
            format!("Seed verification failed for checks: {}", failed_checks.join(", "))
        };

        assert_eq!(message, "Some seed data failed to load");
    }
}
