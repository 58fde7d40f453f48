//! Tidings CLI entry point.

use anyhow::Result;
use clap::Parser;

use tidings::cli::{commands, handle_error, Cli, Commands};
use tidings::domain::models::Config;
use tidings::infrastructure::config::ConfigLoader;
use tidings::infrastructure::logging::{LogConfig, LoggerImpl};

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

fn init_logging(cli: &Cli, config: &Config) -> Result<LoggerImpl> {
    let mut log_config = LogConfig::from_settings(&config.logging)?;
    if cli.verbose {
        log_config = log_config.verbose();
    }
    LoggerImpl::init(&log_config)
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &config, json).await,
        Commands::Status => commands::status::execute(&config, json).await,
        Commands::Archive => commands::archive::execute(&config, json).await,
        Commands::Person(args) => commands::person::execute(args, &config, json).await,
        Commands::Idea(args) => commands::idea::execute(args, &config, json).await,
        Commands::Task(args) => commands::task::execute(args, &config, json).await,
        Commands::Milestone(args) => commands::milestone::execute(args, &config, json).await,
        Commands::Ecard(args) => commands::ecard::execute(args, &config, json).await,
        Commands::History(args) => commands::history::execute(args, &config, json).await,
        Commands::Shopping => commands::shopping::execute(&config, json).await,
        Commands::Writing => commands::writing::execute(&config, json).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => handle_error(err, json),
    };
    let logger = match init_logging(&cli, &config) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, json),
    };

    let result = run(cli, config).await;
    // Flush the file writer before a possible early exit.
    drop(logger);
    if let Err(err) = result {
        handle_error(err, json);
    }
}
