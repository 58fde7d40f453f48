//! Implementation of the `tidings shopping` command.

use anyhow::Result;

use crate::cli::context::AppContext;
use crate::cli::display::{check, money_opt, DetailView};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::ShoppingList;

#[derive(Debug, serde::Serialize)]
pub struct ShoppingOutput {
    #[serde(flatten)]
    pub list: ShoppingList,
}

impl CommandOutput for ShoppingOutput {
    fn to_human(&self) -> String {
        if self.list.entries.is_empty() {
            return format!("Nobody is on the {} gift list.", self.list.year);
        }

        let purchased = self.list.entries.iter().filter(|e| e.purchased).count();
        let mut view = DetailView::new(&format!("Shopping list {}", self.list.year))
            .field("Purchased", format!("{purchased}/{}", self.list.entries.len()));

        for entry in &self.list.entries {
            view = view
                .section(&format!(
                    "{} {} (#{})",
                    check(entry.purchased),
                    entry.person.name,
                    entry.person.id
                ))
                .field("Budget", money_opt(entry.person.budget))
                .field("Given", if entry.given { "yes" } else { "no" });
            if entry.ideas.is_empty() {
                view = view.item("no unused ideas");
            }
            for idea in &entry.ideas {
                view = view.item(idea.idea.as_str());
            }
        }
        view.render()
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let list = ctx.dashboard.shopping_list().await?;
    output(&ShoppingOutput { list }, json_mode);
    Ok(())
}
