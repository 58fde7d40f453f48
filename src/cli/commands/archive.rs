//! Implementation of the `tidings archive` command.

use anyhow::Result;

use crate::cli::context::AppContext;
use crate::cli::display::action_success;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, RolloverSummary};

#[derive(Debug, serde::Serialize)]
pub struct ArchiveOutput {
    pub success: bool,
    pub summary: RolloverSummary,
    pub next_year: i32,
}

impl CommandOutput for ArchiveOutput {
    fn to_human(&self) -> String {
        let s = &self.summary;
        [
            action_success(&format!("Archived {}", s.year)),
            format!("  People:            {}", s.total_people),
            format!("  Gifts given:       {}", s.gifts_given),
            format!("  Handwritten cards: {}", s.handwritten_cards),
            format!("  E-cards sent:      {}", s.ecards_sent),
            format!("Now planning {}", self.next_year),
        ]
        .join("\n")
    }
}

/// Archive the active year. An already archived year surfaces as a warning.
pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let summary = ctx.planning.archive_year_manually().await?;

    let out = ArchiveOutput {
        success: true,
        next_year: summary.year + 1,
        summary,
    };
    output(&out, json_mode);
    Ok(())
}
