use clap::Parser;

use tidings::cli::commands::{ecard::EcardCommands, milestone::MilestoneCommands, person::PersonCommands};
use tidings::cli::{Cli, Commands};
use tidings::domain::models::{CardPreference, PersonType};

#[test]
fn test_parse_status_with_global_flags() {
    let cli = Cli::try_parse_from(["tidings", "status", "--json", "--config", "plan.yaml"]).unwrap();
    assert!(cli.json);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("plan.yaml")));
    assert!(matches!(cli.command, Commands::Status));
}

#[test]
fn test_parse_person_add() {
    let cli = Cli::try_parse_from([
        "tidings",
        "person",
        "add",
        "Ann Smith",
        "--type",
        "Close Friend",
        "--card",
        "handwritten",
        "--budget",
        "40",
    ])
    .unwrap();

    match cli.command {
        Commands::Person(args) => match args.command {
            PersonCommands::Add {
                name,
                person_type,
                card,
                gift,
                budget,
                ..
            } => {
                assert_eq!(name, "Ann Smith");
                assert_eq!(person_type, PersonType::CloseFriend);
                assert_eq!(card, CardPreference::Handwritten);
                assert!(!gift);
                assert_eq!(budget, Some(40.0));
            }
            _ => panic!("Wrong person command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_person_add_defaults() {
    let cli = Cli::try_parse_from(["tidings", "person", "add", "Bob"]).unwrap();
    match cli.command {
        Commands::Person(args) => match args.command {
            PersonCommands::Add { person_type, card, .. } => {
                assert_eq!(person_type, PersonType::Other);
                assert_eq!(card, CardPreference::ECard);
            }
            _ => panic!("Wrong person command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_person_edit_rejects_gift_and_no_gift() {
    let result = Cli::try_parse_from(["tidings", "person", "edit", "3", "--gift", "--no-gift"]);
    assert!(result.is_err());
}

#[test]
fn test_unknown_person_type_is_rejected() {
    let result = Cli::try_parse_from(["tidings", "person", "add", "Ann", "--type", "Pen Pal"]);
    assert!(result.is_err());
}

#[test]
fn test_milestone_subtask_numbers_start_at_one() {
    let cli = Cli::try_parse_from(["tidings", "milestone", "subtask", "7", "2"]).unwrap();
    match cli.command {
        Commands::Milestone(args) => match args.command {
            MilestoneCommands::Subtask { id, number } => {
                assert_eq!(id, 7);
                assert_eq!(number, 2);
            }
            _ => panic!("Wrong milestone command"),
        },
        _ => panic!("Wrong top-level command"),
    }

    assert!(Cli::try_parse_from(["tidings", "milestone", "subtask", "7", "0"]).is_err());
}

#[test]
fn test_ecard_record_requires_recipient() {
    assert!(Cli::try_parse_from(["tidings", "ecard", "record", "ann@example.com", "Delivered"]).is_err());

    let cli = Cli::try_parse_from([
        "tidings",
        "ecard",
        "record",
        "ann@example.com",
        "Delivered",
        "--name",
        "Ann",
        "--year",
        "2025",
    ])
    .unwrap();
    match cli.command {
        Commands::Ecard(args) => match args.command {
            EcardCommands::Record { name, person, year, .. } => {
                assert_eq!(name.as_deref(), Some("Ann"));
                assert_eq!(person, None);
                assert_eq!(year, Some(2025));
            }
            _ => panic!("Wrong ecard command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_history_show_takes_year() {
    let cli = Cli::try_parse_from(["tidings", "history", "show", "2024"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::History(tidings::cli::commands::history::HistoryArgs {
            command: tidings::cli::commands::history::HistoryCommands::Show { year: 2024 }
        })
    ));
}
