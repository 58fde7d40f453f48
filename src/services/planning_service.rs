//! Entry point for the year/phase engine.

use std::sync::Arc;
use tracing::{info, warn};

use super::calendar::PlanningCalendar;
use super::milestone_seeder::MilestoneSeeder;
use super::rollover_service::RolloverEngine;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Phase, RolloverSummary};
use crate::domain::ports::{Clock, PlanningStore, SummaryRepository};

#[derive(Clone)]
pub struct PlanningService {
    calendar: PlanningCalendar,
    store: Arc<dyn PlanningStore>,
    seeder: MilestoneSeeder,
    engine: RolloverEngine,
}

impl PlanningService {
    pub fn new(clock: Arc<dyn Clock>, summaries: Arc<dyn SummaryRepository>, store: Arc<dyn PlanningStore>) -> Self {
        Self {
            calendar: PlanningCalendar::new(clock.clone(), summaries),
            seeder: MilestoneSeeder::new(store.clone()),
            engine: RolloverEngine::new(store.clone(), clock),
            store,
        }
    }

    pub fn calendar(&self) -> &PlanningCalendar {
        &self.calendar
    }

    pub async fn resolve_active_year(&self) -> DomainResult<i32> {
        self.calendar.active_year().await
    }

    pub async fn resolve_current_phase(&self) -> DomainResult<Phase> {
        self.calendar.current_phase().await
    }

    pub async fn days_until_christmas(&self) -> DomainResult<i64> {
        self.calendar.days_until_christmas().await
    }

    /// Close the latest planned year if the calendar has moved past it.
    ///
    /// With no milestones on record the active year is simply seeded. When
    /// several years were skipped only the most recent planned year is
    /// archived. Returns the summary of the archived year, if any.
    pub async fn check_and_rollover_if_needed(&self) -> DomainResult<Option<RolloverSummary>> {
        let active_year = self.resolve_active_year().await?;
        let latest = self.store.latest_milestone_year().await?;

        match latest {
            None => {
                self.seeder.seed(active_year).await?;
                Ok(None)
            }
            Some(latest_year) if latest_year < active_year => {
                match self.engine.perform_rollover(latest_year, active_year).await {
                    Ok(summary) => Ok(Some(summary)),
                    Err(DomainError::AlreadyArchived(year)) => {
                        warn!(year, active_year, "year already archived, seeding active year only");
                        self.seeder.seed(active_year).await?;
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
            Some(_) => Ok(None),
        }
    }

    /// Archive the active year now and start planning the next one.
    pub async fn archive_year_manually(&self) -> DomainResult<RolloverSummary> {
        let active_year = self.resolve_active_year().await?;
        info!(year = active_year, "manual archive requested");
        self.engine.perform_rollover(active_year, active_year + 1).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteRepositories};
    use crate::domain::models::MilestonePhase;
    use crate::domain::ports::{FixedClock, MilestoneRepository};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn service_on(repos: &SqliteRepositories, today: NaiveDate) -> PlanningService {
        PlanningService::new(Arc::new(FixedClock(today)), repos.summaries.clone(), repos.store.clone())
    }

    #[tokio::test]
    async fn test_first_run_seeds_active_year() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repos = SqliteRepositories::new(&pool);
        let service = service_on(&repos, day(2025, 3, 1)).await;

        assert_eq!(service.check_and_rollover_if_needed().await.unwrap(), None);
        assert_eq!(repos.milestones.list_for_year(2026).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_rollover_when_calendar_moves_on() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repos = SqliteRepositories::new(&pool);
        service_on(&repos, day(2025, 10, 1)).await.check_and_rollover_if_needed().await.unwrap();

        let later = service_on(&repos, day(2026, 2, 1)).await;
        let summary = later.check_and_rollover_if_needed().await.unwrap().unwrap();
        assert_eq!(summary.year, 2025);
        assert_eq!(later.resolve_active_year().await.unwrap(), 2027);
        assert_eq!(repos.milestones.list_for_year(2027).await.unwrap().len(), 4);

        assert_eq!(later.check_and_rollover_if_needed().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_up_to_date_year_is_left_alone() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repos = SqliteRepositories::new(&pool);
        let service = service_on(&repos, day(2025, 11, 5)).await;
        service.check_and_rollover_if_needed().await.unwrap();

        assert_eq!(service.check_and_rollover_if_needed().await.unwrap(), None);
        assert_eq!(service.resolve_current_phase().await.unwrap(), Phase::November);
    }

    #[tokio::test]
    async fn test_manual_archive_moves_to_next_year() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repos = SqliteRepositories::new(&pool);
        let service = service_on(&repos, day(2025, 12, 27)).await;
        service.check_and_rollover_if_needed().await.unwrap();

        let summary = service.archive_year_manually().await.unwrap();
        assert_eq!(summary.year, 2025);
        assert_eq!(service.resolve_active_year().await.unwrap(), 2026);
        assert_eq!(service.resolve_current_phase().await.unwrap(), Phase::PrePlanning);
        assert!(repos
            .milestones
            .get_for_phase(2026, MilestonePhase::September)
            .await
            .unwrap()
            .is_some());
    }
}
