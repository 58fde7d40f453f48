//! E-card delivery CLI commands.

use anyhow::{anyhow, Result};
use clap::{ArgGroup, Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::display::{action_success, colorize_delivery_status, DetailView};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, ContactType, DeliveryStats, EcardDelivery};
use crate::services::{DeliveryReport, PersonDeliveries, ReceivedMessage, RecordOutcome};

#[derive(Args, Debug)]
pub struct EcardArgs {
    #[command(subcommand)]
    pub command: EcardCommands,
}

#[derive(Subcommand, Debug)]
pub enum EcardCommands {
    /// Record a delivery outcome reported by the card vendor
    #[command(group(ArgGroup::new("recipient").required(true).args(["person", "name"])))]
    Record {
        /// Email address or phone number the card went to
        contact: String,
        /// Vendor status, e.g. Delivered, Opened or Bounced
        status: String,
        /// Person ID
        #[arg(long)]
        person: Option<i64>,
        /// Match the person by contact, then by this name
        #[arg(long)]
        name: Option<String>,
        /// email or sms (detected from the contact when omitted)
        #[arg(long = "type", value_parser = parse_contact_type)]
        contact_type: Option<ContactType>,
        /// Reply the recipient left
        #[arg(long)]
        message: Option<String>,
        /// Card season (defaults to the one most recently under way)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Deliveries for a season, grouped by person
    List {
        #[arg(long)]
        year: Option<i32>,
    },

    /// People whose card bounced
    Issues {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Replies received on e-cards
    Messages {
        #[arg(long)]
        year: Option<i32>,
    },
}

fn parse_contact_type(s: &str) -> Result<ContactType, String> {
    ContactType::from_str(s).ok_or_else(|| format!("unknown contact type '{s}' (expected email or sms)"))
}

#[derive(Debug, Serialize)]
pub struct RecordOutput {
    pub success: bool,
    pub outcome: RecordOutcome,
    pub delivery: EcardDelivery,
}

impl CommandOutput for RecordOutput {
    fn to_human(&self) -> String {
        let verb = match self.outcome {
            RecordOutcome::Created => "Recorded",
            RecordOutcome::Updated => "Updated",
        };
        let d = &self.delivery;
        action_success(&format!(
            "{verb} {} delivery to {} for {}",
            colorize_delivery_status(&d.status),
            d.contact_used,
            d.year
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct DeliveryListOutput {
    pub year: i32,
    pub available_years: Vec<i32>,
    pub stats: DeliveryStats,
    pub people: Vec<PersonDeliveries>,
}

impl CommandOutput for DeliveryListOutput {
    fn to_human(&self) -> String {
        let mut view = DetailView::new(&format!("E-cards {}", self.year))
            .field("Deliveries", self.stats.total_deliveries.to_string())
            .field("Replies", self.stats.messages_received.to_string())
            .field("Bounced", self.stats.bounced.to_string());
        if !self.available_years.is_empty() {
            let years: Vec<String> = self.available_years.iter().map(ToString::to_string).collect();
            view = view.field("Seasons", years.join(", "));
        }
        for entry in &self.people {
            view = view.section(&entry.person.name);
            for d in &entry.deliveries {
                view = view.item(format!(
                    "{} via {} ({})",
                    colorize_delivery_status(&d.status),
                    d.contact_used,
                    d.contact_type.as_str()
                ));
            }
        }
        view.render()
    }
}

#[derive(Debug, Serialize)]
pub struct IssuesOutput {
    pub year: i32,
    pub people: Vec<PersonDeliveries>,
}

impl CommandOutput for IssuesOutput {
    fn to_human(&self) -> String {
        if self.people.is_empty() {
            return format!("No bounced cards for {}.", self.year);
        }
        let mut view = DetailView::new(&format!("Contact issues {}", self.year));
        for entry in &self.people {
            view = view.section(&format!("{} (#{})", entry.person.name, entry.person.id));
            for d in &entry.deliveries {
                view = view.item(format!("{} bounced", d.contact_used));
            }
        }
        view.render()
    }
}

#[derive(Debug, Serialize)]
pub struct MessagesOutput {
    pub year: i32,
    pub messages: Vec<ReceivedMessage>,
}

impl CommandOutput for MessagesOutput {
    fn to_human(&self) -> String {
        if self.messages.is_empty() {
            return format!("No replies for {}.", self.year);
        }
        let mut view = DetailView::new(&format!("Replies {}", self.year));
        for m in &self.messages {
            view = view
                .section(&format!("{} ({})", m.person_name, m.delivery.imported_date))
                .item(m.delivery.message.clone().unwrap_or_default());
        }
        view.render()
    }
}

pub async fn execute(args: EcardArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let ecards = &ctx.ecards;

    match args.command {
        EcardCommands::Record {
            contact,
            status,
            person,
            name,
            contact_type,
            message,
            year,
        } => {
            let person_id = match (person, name) {
                (Some(id), _) => id,
                (None, Some(name)) => {
                    let kind = contact_type.unwrap_or_else(|| ContactType::detect(&contact));
                    ecards
                        .match_person(&name, &contact, kind)
                        .await?
                        .ok_or_else(|| anyhow!("No active person matches '{name}' or {contact}"))?
                        .id
                }
                (None, None) => return Err(anyhow!("Pass --person or --name")),
            };

            let report = DeliveryReport {
                person_id,
                year,
                contact,
                contact_type,
                status,
                message,
            };
            let (delivery, outcome) = ecards.record_delivery(report).await?;
            output(&RecordOutput { success: true, outcome, delivery }, json_mode);
        }

        EcardCommands::List { year } => {
            let year = ecards.resolve_year(year);
            let out = DeliveryListOutput {
                year,
                available_years: ecards.available_years().await?,
                stats: ecards.stats(year).await?,
                people: ecards.deliveries_by_person(year).await?,
            };
            output(&out, json_mode);
        }

        EcardCommands::Issues { year } => {
            let year = ecards.resolve_year(year);
            let people = ecards.contact_issues(year).await?;
            output(&IssuesOutput { year, people }, json_mode);
        }

        EcardCommands::Messages { year } => {
            let year = ecards.resolve_year(year);
            let messages = ecards.messages(year).await?;
            output(&MessagesOutput { year, messages }, json_mode);
        }
    }

    Ok(())
}
