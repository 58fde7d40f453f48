//! Archive browsing CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::display::{check, list_table, money_opt, render_list, DetailView};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{ArchiveDetail, ArchiveList};

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List archived years
    List,

    /// Show one archived year in detail
    Show {
        /// Archived year
        year: i32,
    },
}

#[derive(Debug, Serialize)]
pub struct HistoryListOutput {
    #[serde(flatten)]
    pub archive: ArchiveList,
}

impl CommandOutput for HistoryListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["year", "people", "gifts", "handwritten", "e-cards", "budget", "archived"]);
        for s in &self.archive.summaries {
            table.add_row(vec![
                s.year.to_string(),
                s.total_people.to_string(),
                s.gifts_given.to_string(),
                s.handwritten_cards.to_string(),
                s.ecards_sent.to_string(),
                money_opt(s.total_budget),
                s.completed_date.to_string(),
            ]);
        }
        format!(
            "Currently planning {}\n{}",
            self.archive.active_year,
            render_list("archived year", "archived years", &table, self.archive.summaries.len())
        )
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryDetailOutput {
    #[serde(flatten)]
    pub detail: ArchiveDetail,
}

impl CommandOutput for HistoryDetailOutput {
    fn to_human(&self) -> String {
        let d = &self.detail;
        let s = &d.summary;
        let mut view = DetailView::new(&format!("Holidays {}", s.year))
            .field("People", s.total_people.to_string())
            .field("Gifts given", s.gifts_given.to_string())
            .field("Handwritten", s.handwritten_cards.to_string())
            .field("E-cards", s.ecards_sent.to_string())
            .field("Budget", money_opt(s.total_budget))
            .field("Archived", s.completed_date.to_string())
            .field_opt("Notes", s.notes.as_deref())
            .section("Milestones");

        for m in &d.milestones {
            let (done, total) = m.progress();
            view = view.item(format!("{} {} {done}/{total}", check(m.completed), m.phase));
        }

        view = view.section("Gifts");
        if d.gift_recipients.is_empty() {
            view = view.item("no gifts recorded");
        }
        for r in &d.gift_recipients {
            view = view.item(format!("{}: {}", r.name, r.gift));
        }

        view.section("E-cards")
            .field("Deliveries", d.delivery_stats.total_deliveries.to_string())
            .field("Replies", d.delivery_stats.messages_received.to_string())
            .field("Bounced", d.delivery_stats.bounced.to_string())
            .render()
    }
}

pub async fn execute(args: HistoryArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    match args.command {
        HistoryCommands::List => {
            let archive = ctx.dashboard.archive_list().await?;
            output(&HistoryListOutput { archive }, json_mode);
        }
        HistoryCommands::Show { year } => {
            let detail = ctx.dashboard.archive_detail(year).await?;
            output(&HistoryDetailOutput { detail }, json_mode);
        }
    }

    Ok(())
}
