//! Tidings - household holiday planner
//!
//! Tracks the people a household sends gifts and cards to, their gift ideas,
//! the seasonal milestones from September to December, e-card deliveries and
//! an archive of past years.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture:
//!
//! - **Domain Layer** (`domain`): models, repository ports and errors
//! - **Service Layer** (`services`): the year/phase engine, rollover and record services
//! - **Adapters** (`adapters`): SQLite implementations of the ports
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tidings::adapters::sqlite::{initialize_database, SqliteRepositories};
//! use tidings::domain::ports::SystemClock;
//! use tidings::services::PlanningService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = initialize_database("sqlite:.tidings/tidings.db", None).await?;
//!     let repos = SqliteRepositories::new(&pool);
//!     let planning = PlanningService::new(Arc::new(SystemClock), repos.summaries, repos.store);
//!     if let Some(summary) = planning.check_and_rollover_if_needed().await? {
//!         println!("archived {}", summary.year);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AnnualSummary, CardPreference, Config, DatabaseConfig, EcardDelivery, GiftIdea, LoggingConfig, Milestone,
    MilestonePhase, Person, PersonType, Phase, RolloverSummary, Task, TaskType,
};
pub use domain::ports::{Clock, FixedClock, PlanningStore, PlanningTransaction, SystemClock};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{MilestoneSeeder, PlanningService, RolloverEngine};
