//! Service layer: the year/phase engine and the record services built on it.

pub mod calendar;
pub mod dashboard_service;
pub mod ecard_service;
pub mod gift_idea_service;
pub mod milestone_seeder;
pub mod milestone_service;
pub mod person_service;
pub mod planning_service;
pub mod rollover_service;
pub mod task_service;

pub use calendar::{base_year, days_until_christmas, default_delivery_year, phase_for, PlanningCalendar};
pub use dashboard_service::{
    ArchiveDetail, ArchiveList, Dashboard, DashboardService, DashboardSources, GiftRecipient, ShoppingEntry,
    ShoppingList, WritingEntry, WritingQueue,
};
pub use ecard_service::{DeliveryReport, EcardService, PersonDeliveries, ReceivedMessage, RecordOutcome};
pub use gift_idea_service::GiftIdeaService;
pub use milestone_seeder::{seed_in, MilestoneSeeder};
pub use milestone_service::MilestoneService;
pub use person_service::{PersonChanges, PersonService};
pub use planning_service::PlanningService;
pub use rollover_service::RolloverEngine;
pub use task_service::TaskService;
