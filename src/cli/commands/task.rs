//! Gift and card task CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::display::{action_success, check};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Task, TaskType};

#[derive(Args, Debug)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Get (or create) a person's task for the active year
    Ensure {
        /// Person ID
        person_id: i64,
        /// gift_purchased, card_written, gift_given or any custom tag
        #[arg(long = "type", value_parser = parse_task_type)]
        task_type: TaskType,
    },

    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: i64,
    },

    /// Mark a gift as given, recording what it was
    Give {
        /// Task ID
        id: i64,
        /// What the gift actually was
        #[arg(long)]
        gift: Option<String>,
    },
}

fn parse_task_type(s: &str) -> Result<TaskType, String> {
    if s.trim().is_empty() {
        return Err("task type cannot be empty".to_string());
    }
    Ok(TaskType::parse(s))
}

#[derive(Debug, Serialize)]
pub struct TaskOutput {
    pub success: bool,
    pub task: Task,
}

impl CommandOutput for TaskOutput {
    fn to_human(&self) -> String {
        let t = &self.task;
        let mut line = format!("{} #{} {} ({})", check(t.completed), t.id, t.task_type, t.year);
        if let Some(date) = t.completed_date {
            line.push_str(&format!(" done {date}"));
        }
        if let Some(gift) = &t.actual_gift {
            line.push_str(&format!(": {gift}"));
        }
        action_success(&line)
    }
}

pub async fn execute(args: TaskArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    let task = match args.command {
        TaskCommands::Ensure { person_id, task_type } => ctx.tasks.ensure_task(person_id, task_type).await?,
        TaskCommands::Toggle { id } => ctx.tasks.toggle_task(id).await?,
        TaskCommands::Give { id, gift } => ctx.tasks.complete_gift(id, gift).await?,
    };

    output(&TaskOutput { success: true, task }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_type() {
        assert_eq!(parse_task_type("gift_given"), Ok(TaskType::GiftGiven));
        assert_eq!(parse_task_type("wrap"), Ok(TaskType::Other("wrap".to_string())));
        assert!(parse_task_type("  ").is_err());
    }
}
