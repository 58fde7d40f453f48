//! Seasonal milestone CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::display::{action_success, check, DetailView};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Milestone};

#[derive(Args, Debug)]
pub struct MilestoneArgs {
    #[command(subcommand)]
    pub command: MilestoneCommands,
}

#[derive(Subcommand, Debug)]
pub enum MilestoneCommands {
    /// List the active year's milestones with their checklists
    List,

    /// Mark a milestone done (checks every subtask) or reopen it
    Toggle {
        /// Milestone ID
        id: i64,
    },

    /// Check or uncheck one subtask
    Subtask {
        /// Milestone ID
        id: i64,
        /// Subtask number as shown by `milestone list` (starting at 1)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },

    /// Attach a reference link to a milestone
    Link {
        /// Milestone ID
        id: i64,
        /// URL to attach; omit to clear
        url: Option<String>,
    },
}

fn render_milestone(view: DetailView, m: &Milestone) -> DetailView {
    let (done, total) = m.progress();
    let mut view = view
        .section(&format!("{} #{} {}", check(m.completed), m.id, m.phase))
        .field("Goal", m.description.as_str())
        .field("Progress", format!("{done}/{total}"))
        .field_opt("Link", m.link.as_deref());
    if let Some(date) = m.completed_date {
        view = view.field("Completed", date.to_string());
    }
    for (i, subtask) in m.subtasks.iter().enumerate() {
        view = view.item(format!("{} {}. {}", check(m.completed_subtasks.contains(&i)), i + 1, subtask));
    }
    view
}

#[derive(Debug, Serialize)]
pub struct MilestoneListOutput {
    pub year: i32,
    pub milestones: Vec<Milestone>,
}

impl CommandOutput for MilestoneListOutput {
    fn to_human(&self) -> String {
        if self.milestones.is_empty() {
            return format!("No milestones for {}.", self.year);
        }
        self.milestones
            .iter()
            .fold(DetailView::new(&format!("Milestones {}", self.year)), render_milestone)
            .render()
    }
}

#[derive(Debug, Serialize)]
pub struct MilestoneOutput {
    pub success: bool,
    pub milestone: Milestone,
}

impl CommandOutput for MilestoneOutput {
    fn to_human(&self) -> String {
        let m = &self.milestone;
        let (done, total) = m.progress();
        let state = if m.completed { "complete" } else { "open" };
        let header = action_success(&format!("{} {} is {state} ({done}/{total})", m.phase, m.year));
        format!("{header}\n{}", render_milestone(DetailView::new(""), m).render())
    }
}

pub async fn execute(args: MilestoneArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    let milestone = match args.command {
        MilestoneCommands::List => {
            ctx.planning.check_and_rollover_if_needed().await?;
            let (year, milestones) = ctx.milestones.active_milestones().await?;
            output(&MilestoneListOutput { year, milestones }, json_mode);
            return Ok(());
        }
        MilestoneCommands::Toggle { id } => ctx.milestones.toggle(id).await?,
        MilestoneCommands::Subtask { id, number } => {
            let index = usize::try_from(number - 1).unwrap_or(usize::MAX);
            ctx.milestones.toggle_subtask(id, index).await?
        }
        MilestoneCommands::Link { id, url } => ctx.milestones.set_link(id, url).await?,
    };

    output(&MilestoneOutput { success: true, milestone }, json_mode);
    Ok(())
}
