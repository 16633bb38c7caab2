pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use stocky_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "stocky",
    about = "Stocky inventory stock-check CLI",
    long_about = "Validate stock requests against the inventory database, manage migrations and seeds, and inspect runtime readiness.",
    after_help = "Examples:\n  stocky check sku-dry-rice-25kg:10 sku-olive-oil-1l:30\n  stocky migrate\n  stocky doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run a batch stock check and print the result as JSON")]
    Check {
        #[arg(
            required = true,
            value_name = "PRODUCT_ID:QUANTITY",
            help = "Items to check, e.g. sku-dry-rice-25kg:10"
        )]
        items: Vec<String>,
    },
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic stock scenario seed dataset")]
    Seed,
    #[command(
        about = "Inspect effective configuration values with source attribution per field"
    )]
    Config,
    #[command(about = "Validate config and run database readiness checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Logging is best effort here. A broken config still reaches the
    // command, which reports it as a structured failure.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        logging::init_logging(&config.logging);
    }

    let result = match cli.command {
        Command::Check { items } => commands::check::run(&items),
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
