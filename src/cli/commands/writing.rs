//! Implementation of the `tidings writing` command.

use anyhow::Result;

use crate::cli::context::AppContext;
use crate::cli::display::{check, list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::WritingQueue;

#[derive(Debug, serde::Serialize)]
pub struct WritingOutput {
    #[serde(flatten)]
    pub queue: WritingQueue,
}

impl CommandOutput for WritingOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["", "id", "addressee", "task"]);
        for entry in &self.queue.entries {
            table.add_row(vec![
                check(entry.completed).to_string(),
                entry.person.id.to_string(),
                entry.person.addressee().to_string(),
                entry.task_id.map(|id| format!("#{id}")).unwrap_or_default(),
            ]);
        }
        let written = self.queue.entries.iter().filter(|e| e.completed).count();
        format!(
            "Cards written for {}: {written}/{}\n{}",
            self.queue.year,
            self.queue.entries.len(),
            render_list("card", "cards", &table, self.queue.entries.len())
        )
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let queue = ctx.dashboard.writing_queue().await?;
    output(&WritingOutput { queue }, json_mode);
    Ok(())
}
