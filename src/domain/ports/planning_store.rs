//! Transactional unit of work for year-close operations.
//!
//! The rollover engine and the milestone seeder run all of their reads and
//! writes through one `PlanningTransaction`. Nothing is visible to other
//! readers until `commit` succeeds; dropping the transaction without
//! committing rolls every change back.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AnnualSummary, CardPreference, Milestone, MilestonePhase, TaskType};

/// Opens planning transactions.
#[async_trait]
pub trait PlanningStore: Send + Sync {
    /// Open a transaction that holds the write lock until commit or drop.
    async fn begin(&self) -> DomainResult<Box<dyn PlanningTransaction>>;

    /// Highest year that has any milestone. Reads outside any transaction.
    async fn latest_milestone_year(&self) -> DomainResult<Option<i32>>;
}

/// Queries and writes available inside one planning transaction.
#[async_trait]
pub trait PlanningTransaction: Send {
    /// Number of people currently marked active.
    async fn count_active_people(&mut self) -> DomainResult<i64>;

    /// Completed tasks of `task_type` in `year`.
    async fn count_completed_tasks(&mut self, year: i32, task_type: &TaskType) -> DomainResult<i64>;

    /// Completed `card_written` tasks in `year` whose person prefers `preference`.
    async fn count_completed_cards(&mut self, year: i32, preference: CardPreference) -> DomainResult<i64>;

    /// Budget total over active gift recipients, `None` when nobody has a budget.
    async fn total_gift_budget(&mut self) -> DomainResult<Option<f64>>;

    async fn summary_exists(&mut self, year: i32) -> DomainResult<bool>;

    /// Insert the summary. A summary already present for the year yields
    /// `DomainError::AlreadyArchived`.
    async fn insert_summary(&mut self, summary: &AnnualSummary) -> DomainResult<i64>;

    /// Person ids of completed `gift_given` tasks in `year`, one entry per
    /// task, in task id order. Year-level tasks (no person) are skipped.
    async fn completed_gift_recipients(&mut self, year: i32) -> DomainResult<Vec<i64>>;

    /// Mark the person's most recently added unused idea as used in `year`.
    /// Ties on `added_date` go to the higher id. Returns the consumed idea id.
    async fn consume_latest_unused_idea(&mut self, person_id: i64, year: i32) -> DomainResult<Option<i64>>;

    /// Phases that already have a milestone row for `year`.
    async fn existing_phases(&mut self, year: i32) -> DomainResult<Vec<MilestonePhase>>;

    async fn insert_milestone(&mut self, milestone: &Milestone) -> DomainResult<i64>;

    /// Make every change in this transaction visible at once.
    async fn commit(&mut self) -> DomainResult<()>;
}
