use std::sync::Arc;

use clap::Parser;
use matchquiz::cli::output::print_config;
use matchquiz::cli::{handle_command, Cli, Commands};
use matchquiz::config::AppConfig;
use matchquiz::database::Database;
use matchquiz::service::MatchQuizService;
use matchquiz::Result;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    matchquiz::logging::apply_backtrace_setting(&config.logging);

    // Initialize logging
    if cli.verbose {
        matchquiz::logging::init_logging_with_level("debug")?;
    } else {
        matchquiz::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    if matches!(cli.command, Commands::Config) {
        print_config(&config);
        return Ok(());
    }

    // Create database connection
    let database = Database::from_config(&config).await?;
    if !matches!(cli.command, Commands::Init) {
        database.verify_schema_or_error().await?;
    }

    let store = Arc::new(database.clone());
    let service = MatchQuizService::with_store(store, config.questionnaire.clone());

    handle_command(cli.command, &config, &database, &service).await
}
