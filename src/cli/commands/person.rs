//! Person management CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::display::{action_success, list_table, money_opt, or_dash, render_list, DetailView};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{CardPreference, Config, GiftIdea, Person, PersonType, Task};
use crate::domain::ports::PersonFilter;
use crate::services::PersonChanges;

#[derive(Args, Debug)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommands,
}

#[derive(Subcommand, Debug)]
pub enum PersonCommands {
    /// Add someone to the list
    Add {
        /// Full name
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Relationship, e.g. "Family" or "Close Friend"
        #[arg(long = "type", value_parser = parse_person_type, default_value = "Other")]
        person_type: PersonType,
        /// Card preference: handwritten, e-card or none
        #[arg(long, value_parser = parse_card_preference, default_value = "e-card")]
        card: CardPreference,
        /// Put this person on the gift list
        #[arg(long)]
        gift: bool,
        /// Planned gift spend (implies --gift)
        #[arg(long)]
        budget: Option<f64>,
        /// Name to write on the card, if different
        #[arg(long)]
        addressee: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change someone's details. Pass an empty string to clear a text field.
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long = "type", value_parser = parse_person_type)]
        person_type: Option<PersonType>,
        #[arg(long, value_parser = parse_card_preference)]
        card: Option<CardPreference>,
        /// Put this person on the gift list
        #[arg(long, conflicts_with = "no_gift")]
        gift: bool,
        /// Take this person off the gift list
        #[arg(long)]
        no_gift: bool,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        addressee: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List people
    List {
        #[arg(long = "type", value_parser = parse_person_type)]
        person_type: Option<PersonType>,
        #[arg(long, value_parser = parse_card_preference)]
        card: Option<CardPreference>,
        /// Only people on the gift list
        #[arg(long)]
        gifts: bool,
        /// Show removed people instead of active ones
        #[arg(long)]
        removed: bool,
    },

    /// Show one person with their ideas and gift history
    Show { id: i64 },

    /// Remove someone from the list (their history is kept)
    Remove { id: i64 },
}

fn parse_person_type(s: &str) -> Result<PersonType, String> {
    PersonType::from_str(s).ok_or_else(|| {
        let valid: Vec<&str> = PersonType::ALL.iter().map(PersonType::as_str).collect();
        format!("unknown person type '{s}' (expected one of: {})", valid.join(", "))
    })
}

fn parse_card_preference(s: &str) -> Result<CardPreference, String> {
    CardPreference::from_str(s)
        .ok_or_else(|| format!("unknown card preference '{s}' (expected handwritten, e-card or none)"))
}

#[derive(Debug, Serialize)]
pub struct PersonActionOutput {
    pub success: bool,
    pub action: &'static str,
    pub person: Person,
}

impl CommandOutput for PersonActionOutput {
    fn to_human(&self) -> String {
        action_success(&format!("{} {} (#{})", self.action, self.person.name, self.person.id))
    }
}

#[derive(Debug, Serialize)]
pub struct PersonListOutput {
    pub people: Vec<Person>,
    pub total: usize,
}

impl CommandOutput for PersonListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "name", "type", "card", "gift", "budget"]);
        for p in &self.people {
            table.add_row(vec![
                p.id.to_string(),
                truncate(&p.name, 30),
                p.person_type.as_str().to_string(),
                p.card_preference.as_str().to_string(),
                if p.gets_gift { "yes" } else { "" }.to_string(),
                money_opt(p.budget),
            ]);
        }
        render_list("person", "people", &table, self.total)
    }
}

#[derive(Debug, Serialize)]
pub struct PersonDetailOutput {
    pub person: Person,
    pub ideas: Vec<GiftIdea>,
    pub gift_history: Vec<Task>,
}

impl CommandOutput for PersonDetailOutput {
    fn to_human(&self) -> String {
        let p = &self.person;
        let mut view = DetailView::new(&format!("{} (#{})", p.name, p.id))
            .field("Type", p.person_type.as_str())
            .field("Card", p.card_preference.as_str())
            .field("Addressee", p.addressee())
            .field("Email", or_dash(p.email.as_deref()))
            .field("Phone", or_dash(p.phone.as_deref()))
            .field("Gift", if p.gets_gift { "yes" } else { "no" })
            .field("Budget", money_opt(p.budget))
            .field_opt("Notes", p.notes.as_deref());
        if !p.active {
            view = view.field("Status", "removed");
        }

        view = view.section("Gift ideas");
        if self.ideas.is_empty() {
            view = view.item("none yet");
        }
        for idea in &self.ideas {
            let used = idea.used_year.map(|y| format!(" (used {y})")).unwrap_or_default();
            view = view.item(format!("{} [{}]{}", idea.idea, idea.added_date, used));
        }

        view = view.section("Gift history");
        if self.gift_history.is_empty() {
            view = view.item("no gifts recorded");
        }
        for task in &self.gift_history {
            view = view.item(format!(
                "{}: {}",
                task.year,
                task.actual_gift.as_deref().unwrap_or("No details recorded")
            ));
        }

        view.render()
    }
}

pub async fn execute(args: PersonArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    match args.command {
        PersonCommands::Add {
            name,
            email,
            phone,
            person_type,
            card,
            gift,
            budget,
            addressee,
            notes,
        } => {
            let mut person = Person::new(name).with_type(person_type).with_card_preference(card);
            person.email = email;
            person.phone = phone;
            if gift || budget.is_some() {
                person = person.with_gift(budget);
            }
            person.card_addressee = addressee.filter(|a| !a.trim().is_empty());
            person.notes = notes.filter(|n| !n.trim().is_empty());

            let person = ctx.people.add_person(person).await?;
            output(&PersonActionOutput { success: true, action: "Added", person }, json_mode);
        }

        PersonCommands::Edit {
            id,
            name,
            email,
            phone,
            person_type,
            card,
            gift,
            no_gift,
            budget,
            addressee,
            notes,
        } => {
            let gets_gift = match (gift, no_gift) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let changes = PersonChanges {
                name,
                email,
                phone,
                person_type,
                card_preference: card,
                gets_gift,
                budget,
                card_addressee: addressee,
                notes,
            };
            let person = ctx.people.edit_person(id, changes).await?;
            output(&PersonActionOutput { success: true, action: "Updated", person }, json_mode);
        }

        PersonCommands::List {
            person_type,
            card,
            gifts,
            removed,
        } => {
            let filter = PersonFilter {
                active: Some(!removed),
                person_type,
                card_preference: card,
                gets_gift: gifts.then_some(true),
                ..Default::default()
            };
            let people = ctx.people.list_people(filter).await?;
            let total = people.len();
            output(&PersonListOutput { people, total }, json_mode);
        }

        PersonCommands::Show { id } => {
            let person = ctx.people.get_person(id).await?;
            let ideas = ctx.ideas.list_ideas(id).await?;
            let gift_history = ctx.tasks.gift_history(id).await?;
            output(&PersonDetailOutput { person, ideas, gift_history }, json_mode);
        }

        PersonCommands::Remove { id } => {
            let person = ctx.people.remove_person(id).await?;
            output(&PersonActionOutput { success: true, action: "Removed", person }, json_mode);
        }
    }

    Ok(())
}
