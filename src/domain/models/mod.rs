pub mod annual_summary;
pub mod config;
pub mod ecard_delivery;
pub mod gift_idea;
pub mod milestone;
pub mod person;
pub mod phase;
pub mod task;

pub use annual_summary::{AnnualSummary, RolloverSummary, YearStats};
pub use config::{Config, DatabaseConfig, LoggingConfig};
pub use ecard_delivery::{ContactType, DeliveryStats, EcardDelivery, BOUNCED_STATUS};
pub use gift_idea::GiftIdea;
pub use milestone::{subtasks_for, template_for, Milestone, PhaseTemplate, MILESTONE_TEMPLATES};
pub use person::{normalize_phone, CardPreference, Person, PersonType};
pub use phase::{MilestonePhase, Phase};
pub use task::{Task, TaskType};
