//! Milestone checklist operations.

use std::sync::Arc;

use super::calendar::PlanningCalendar;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Milestone;
use crate::domain::ports::MilestoneRepository;

#[derive(Clone)]
pub struct MilestoneService {
    milestones: Arc<dyn MilestoneRepository>,
    calendar: PlanningCalendar,
}

impl MilestoneService {
    pub fn new(milestones: Arc<dyn MilestoneRepository>, calendar: PlanningCalendar) -> Self {
        Self { milestones, calendar }
    }

    /// Milestones of the active year, with that year.
    pub async fn active_milestones(&self) -> DomainResult<(i32, Vec<Milestone>)> {
        let year = self.calendar.active_year().await?;
        Ok((year, self.milestones.list_for_year(year).await?))
    }

    pub async fn get_milestone(&self, id: i64) -> DomainResult<Milestone> {
        self.milestones.get(id).await?.ok_or(DomainError::MilestoneNotFound(id))
    }

    /// Manual completion toggle. Subtasks follow the milestone.
    pub async fn toggle(&self, id: i64) -> DomainResult<Milestone> {
        let mut milestone = self.get_milestone(id).await?;
        milestone.toggle(self.calendar.today());
        self.milestones.update(&milestone).await?;
        Ok(milestone)
    }

    /// Toggle one subtask; the milestone completes exactly when all subtasks do.
    pub async fn toggle_subtask(&self, id: i64, index: usize) -> DomainResult<Milestone> {
        let mut milestone = self.get_milestone(id).await?;
        milestone.toggle_subtask(index, self.calendar.today())?;
        self.milestones.update(&milestone).await?;
        Ok(milestone)
    }

    /// Attach a reference link; blank clears it.
    pub async fn set_link(&self, id: i64, link: Option<String>) -> DomainResult<Milestone> {
        let mut milestone = self.get_milestone(id).await?;
        milestone.link = link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());
        self.milestones.update(&milestone).await?;
        Ok(milestone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteRepositories};
    use crate::domain::models::MilestonePhase;
    use crate::domain::ports::FixedClock;
    use crate::services::MilestoneSeeder;
    use chrono::NaiveDate;

    async fn setup() -> MilestoneService {
        setup_on(create_migrated_test_pool().await.unwrap()).await
    }

    async fn setup_on(pool: sqlx::SqlitePool) -> MilestoneService {
        let repos = SqliteRepositories::new(&pool);
        MilestoneSeeder::new(repos.store.clone()).seed(2025).await.unwrap();
        let calendar = PlanningCalendar::new(
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 10, 2).unwrap())),
            repos.summaries.clone(),
        );
        MilestoneService::new(repos.milestones.clone(), calendar)
    }

    async fn october(service: &MilestoneService) -> Milestone {
        let (_, milestones) = service.active_milestones().await.unwrap();
        milestones.into_iter().find(|m| m.phase == MilestonePhase::October).unwrap()
    }

    #[tokio::test]
    async fn test_subtasks_drive_completion() {
        let service = setup().await;
        let id = october(&service).await.id;

        service.toggle_subtask(id, 0).await.unwrap();
        service.toggle_subtask(id, 1).await.unwrap();
        let done = service.toggle_subtask(id, 2).await.unwrap();
        assert!(done.completed);

        let undone = service.toggle_subtask(id, 1).await.unwrap();
        assert!(!undone.completed);
        assert_eq!(undone.completed_date, None);
        assert_eq!(service.get_milestone(id).await.unwrap().progress(), (2, 3));
    }

    #[tokio::test]
    async fn test_subtask_index_out_of_range() {
        let service = setup().await;
        let id = october(&service).await.id;
        assert!(matches!(
            service.toggle_subtask(id, 3).await,
            Err(DomainError::SubtaskOutOfRange { index: 3, len: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_manual_toggle_and_link() {
        let service = setup().await;
        let id = october(&service).await.id;

        let toggled = service.toggle(id).await.unwrap();
        assert!(toggled.completed);
        assert!(toggled.all_subtasks_done());

        let linked = service.set_link(id, Some(" https://example.com/plan ".to_string())).await.unwrap();
        assert_eq!(linked.link.as_deref(), Some("https://example.com/plan"));
        let cleared = service.set_link(id, Some("   ".to_string())).await.unwrap();
        assert_eq!(cleared.link, None);
    }

    #[tokio::test]
    async fn test_stored_milestone_without_subtasks_is_a_manual_flag() {
        let pool = create_migrated_test_pool().await.unwrap();
        let service = setup_on(pool.clone()).await;
        let id = october(&service).await.id;
        sqlx::query("UPDATE milestones SET subtasks = '[]', completed_subtasks = '[]' WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();

        let loaded = service.get_milestone(id).await.unwrap();
        assert!(loaded.subtasks.is_empty());
        assert!(matches!(
            service.toggle_subtask(id, 0).await,
            Err(DomainError::SubtaskOutOfRange { index: 0, len: 0, .. })
        ));

        let done = service.toggle(id).await.unwrap();
        assert!(done.completed);
        assert_eq!(done.completed_date, NaiveDate::from_ymd_opt(2025, 10, 2));
        let stored = service.get_milestone(id).await.unwrap();
        assert!(stored.completed);
        assert!(stored.completed_subtasks.is_empty());

        let reopened = service.toggle(id).await.unwrap();
        assert!(!reopened.completed);
        assert!(!service.get_milestone(id).await.unwrap().completed);
    }
}
