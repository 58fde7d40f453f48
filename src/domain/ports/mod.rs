//! Port trait definitions (Hexagonal Architecture)
//!
//! Async interfaces the services depend on and the SQLite adapters implement:
//! - Repositories for people, gift ideas, tasks, milestones, summaries and e-card deliveries
//! - `PlanningStore`: transactional unit of work for rollover and seeding
//! - `Clock`: source of "today"

pub mod clock;
pub mod ecard_delivery_repository;
pub mod gift_idea_repository;
pub mod milestone_repository;
pub mod person_repository;
pub mod planning_store;
pub mod summary_repository;
pub mod task_repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ecard_delivery_repository::EcardDeliveryRepository;
pub use gift_idea_repository::GiftIdeaRepository;
pub use milestone_repository::MilestoneRepository;
pub use person_repository::{PersonFilter, PersonRepository};
pub use planning_store::{PlanningStore, PlanningTransaction};
pub use summary_repository::SummaryRepository;
pub use task_repository::{TaskFilter, TaskRepository};
