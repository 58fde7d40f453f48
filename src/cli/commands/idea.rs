//! Gift idea CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::display::{action_success, list_table, or_dash, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{Config, GiftIdea};

#[derive(Args, Debug)]
pub struct IdeaArgs {
    #[command(subcommand)]
    pub command: IdeaCommands,
}

#[derive(Subcommand, Debug)]
pub enum IdeaCommands {
    /// Note a gift idea for someone
    Add {
        /// Person ID
        person_id: i64,
        /// The idea itself
        idea: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List someone's ideas, most recent first
    List {
        /// Person ID
        person_id: i64,
        /// Hide ideas already used in an archived year
        #[arg(long)]
        unused: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct IdeaAddOutput {
    pub success: bool,
    pub idea: GiftIdea,
}

impl CommandOutput for IdeaAddOutput {
    fn to_human(&self) -> String {
        action_success(&format!("Saved idea #{}: {}", self.idea.id, self.idea.idea))
    }
}

#[derive(Debug, Serialize)]
pub struct IdeaListOutput {
    pub person_id: i64,
    pub ideas: Vec<GiftIdea>,
    pub total: usize,
}

impl CommandOutput for IdeaListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "idea", "added", "used", "notes"]);
        for idea in &self.ideas {
            table.add_row(vec![
                idea.id.to_string(),
                truncate(&idea.idea, 40),
                idea.added_date.to_string(),
                idea.used_year.map(|y| y.to_string()).unwrap_or_default(),
                truncate(&or_dash(idea.notes.as_deref()), 30),
            ]);
        }
        render_list("idea", "ideas", &table, self.total)
    }
}

pub async fn execute(args: IdeaArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    match args.command {
        IdeaCommands::Add { person_id, idea, notes } => {
            let idea = ctx.ideas.add_idea(person_id, &idea, notes.as_deref()).await?;
            output(&IdeaAddOutput { success: true, idea }, json_mode);
        }
        IdeaCommands::List { person_id, unused } => {
            ctx.people.get_person(person_id).await?;
            let ideas = if unused {
                ctx.ideas.unused_ideas(person_id).await?
            } else {
                ctx.ideas.list_ideas(person_id).await?
            };
            let total = ideas.len();
            output(&IdeaListOutput { person_id, ideas, total }, json_mode);
        }
    }

    Ok(())
}
