//! Milestone repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Milestone, MilestonePhase};

/// Read/update access to milestones. Creation goes through the seeder.
#[async_trait]
pub trait MilestoneRepository: Send + Sync {
    async fn get(&self, id: i64) -> DomainResult<Option<Milestone>>;

    async fn get_for_phase(&self, year: i32, phase: MilestonePhase) -> DomainResult<Option<Milestone>>;

    /// Milestones for a year in phase order.
    async fn list_for_year(&self, year: i32) -> DomainResult<Vec<Milestone>>;

    /// Persist completion state, subtask progress and link.
    async fn update(&self, milestone: &Milestone) -> DomainResult<()>;
}
