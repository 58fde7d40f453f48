//! Command-line interface for Tidings.

pub mod commands;
pub mod context;
pub mod display;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::errors::DomainError;

pub use context::AppContext;
pub use output::{output, CommandOutput};

#[derive(Parser)]
#[command(name = "tidings")]
#[command(about = "Tidings - holiday gift and card planner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .tidings/
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration and create the database
    Init(commands::init::InitArgs),

    /// Show the dashboard for the active planning year
    Status,

    /// Archive the active year and start the next one
    Archive,

    /// Manage the people on the gift and card list
    Person(commands::person::PersonArgs),

    /// Record and list gift ideas
    Idea(commands::idea::IdeaArgs),

    /// Track gift and card tasks for the active year
    Task(commands::task::TaskArgs),

    /// Work through the seasonal milestones
    Milestone(commands::milestone::MilestoneArgs),

    /// Track e-card deliveries and replies
    Ecard(commands::ecard::EcardArgs),

    /// Browse archived years
    History(commands::history::HistoryArgs),

    /// Gift recipients with their unused ideas
    Shopping,

    /// Handwritten cards still to write
    Writing,
}

#[derive(serde::Serialize)]
struct ErrorOutput {
    success: bool,
    warning: bool,
    error: String,
    causes: Vec<String>,
}

/// Print a failed command and exit.
///
/// Benign domain outcomes (a year that is already archived, a duplicate
/// person) print as warnings and exit with status 2; everything else
/// prints the error chain and exits with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let benign = err
        .downcast_ref::<DomainError>()
        .is_some_and(DomainError::is_benign);
    let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();

    if json_mode {
        let body = ErrorOutput {
            success: false,
            warning: benign,
            error: err.to_string(),
            causes,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else if benign {
        eprintln!("{} {}", console::style("warning:").yellow().bold(), err);
    } else {
        eprintln!("{} {}", console::style("error:").red().bold(), err);
        for cause in &causes {
            eprintln!("  caused by: {cause}");
        }
    }

    std::process::exit(if benign { 2 } else { 1 });
}
