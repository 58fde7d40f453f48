//! Implementation of the `tidings status` command.

use anyhow::Result;

use crate::cli::context::AppContext;
use crate::cli::display::{action_warning, check, money, DetailView};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Phase};
use crate::services::Dashboard;

#[derive(Debug, serde::Serialize)]
pub struct StatusOutput {
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let d = &self.dashboard;
        let mut lines = Vec::new();

        if let Some(rollover) = &d.rollover {
            lines.push(action_warning(&format!(
                "Archived {} ({} people, {} gifts given). Now planning {}.",
                rollover.year, rollover.total_people, rollover.gifts_given, d.active_year
            )));
            lines.push(String::new());
        }

        let countdown = match d.days_until_christmas {
            0 => "Christmas is today".to_string(),
            1 => "1 day until Christmas".to_string(),
            n => format!("{n} days until Christmas"),
        };

        let mut view = DetailView::new(&format!("Holiday plan {}", d.active_year))
            .field("Phase", d.phase.as_str())
            .field("Countdown", countdown)
            .section("People")
            .field("On the list", d.total_people.to_string())
            .field("Getting gifts", d.people_with_gifts.to_string())
            .field("Handwritten", d.handwritten_count.to_string())
            .field("E-cards", d.ecard_count.to_string())
            .field("Gift budget", money(d.total_budget))
            .section("Progress")
            .field("Purchased", format!("{}/{}", d.gifts_purchased, d.people_with_gifts))
            .field("Given", format!("{}/{}", d.gifts_given, d.people_with_gifts))
            .field("Cards written", format!("{}/{}", d.cards_written, d.handwritten_count))
            .field("Milestones", format!("{:.0}%", d.milestone_progress))
            .section("Milestones");

        for milestone in &d.milestones {
            let (done, total) = milestone.progress();
            let marker = if d.current_milestone.as_ref().is_some_and(|c| c.id == milestone.id) {
                " <- now"
            } else {
                ""
            };
            view = view.item(format!(
                "{} {:<9} {}/{}{}",
                check(milestone.completed),
                milestone.phase.as_str(),
                done,
                total,
                marker
            ));
        }

        if d.phase == Phase::PrePlanning {
            view = view.item("Planning opens in September");
        }

        lines.push(view.render());
        lines.join("\n")
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let dashboard = ctx.dashboard.snapshot().await?;
    output(&StatusOutput { dashboard }, json_mode);
    Ok(())
}
