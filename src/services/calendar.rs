//! Planning calendar: which season is being planned and where in it we are.
//!
//! Everything here is derived from "today" plus the set of archived years.
//! Nothing is cached between calls.

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{MilestonePhase, Phase};
use crate::domain::ports::{Clock, SummaryRepository};

/// September through December plan the current year; earlier months plan the next one.
pub fn base_year(today: NaiveDate) -> i32 {
    if today.month() >= 9 {
        today.year()
    } else {
        today.year() + 1
    }
}

/// Phase of `active_year` on `today`.
pub fn phase_for(today: NaiveDate, active_year: i32) -> Phase {
    if today.year() < active_year {
        return Phase::PrePlanning;
    }
    MilestonePhase::from_month(today.month()).map_or(Phase::PrePlanning, Phase::from)
}

/// Days from `today` to Christmas of `year`. Negative once it has passed.
pub fn days_until_christmas(today: NaiveDate, year: i32) -> i64 {
    match NaiveDate::from_ymd_opt(year, 12, 25) {
        Some(christmas) => (christmas - today).num_days(),
        None => 0,
    }
}

/// Season whose e-card results are most likely being reviewed.
pub fn default_delivery_year(today: NaiveDate) -> i32 {
    if today.month() <= 8 {
        today.year() - 1
    } else {
        today.year()
    }
}

/// Resolves the active year and phase against the archive.
#[derive(Clone)]
pub struct PlanningCalendar {
    clock: Arc<dyn Clock>,
    summaries: Arc<dyn SummaryRepository>,
}

impl PlanningCalendar {
    pub fn new(clock: Arc<dyn Clock>, summaries: Arc<dyn SummaryRepository>) -> Self {
        Self { clock, summaries }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// First year at or after the base year that has not been archived.
    pub async fn active_year(&self) -> DomainResult<i32> {
        let mut year = base_year(self.today());
        while self.summaries.exists(year).await? {
            year += 1;
        }
        Ok(year)
    }

    pub async fn current_phase(&self) -> DomainResult<Phase> {
        let active_year = self.active_year().await?;
        Ok(phase_for(self.today(), active_year))
    }

    pub async fn days_until_christmas(&self) -> DomainResult<i64> {
        let active_year = self.active_year().await?;
        Ok(days_until_christmas(self.today(), active_year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteSummaryRepository};
    use crate::domain::ports::FixedClock;
    use sqlx::SqlitePool;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn archive(pool: &SqlitePool, year: i32) {
        sqlx::query("INSERT INTO annual_summaries (year, completed_date) VALUES (?, '2026-01-01')")
            .bind(year)
            .execute(pool)
            .await
            .unwrap();
    }

    async fn calendar_on(today: NaiveDate) -> (PlanningCalendar, SqlitePool) {
        let pool = create_migrated_test_pool().await.unwrap();
        let calendar = PlanningCalendar::new(
            Arc::new(FixedClock(today)),
            Arc::new(SqliteSummaryRepository::new(pool.clone())),
        );
        (calendar, pool)
    }

    #[test]
    fn test_base_year_boundaries() {
        assert_eq!(base_year(day(2025, 8, 31)), 2026);
        assert_eq!(base_year(day(2025, 9, 1)), 2025);
        assert_eq!(base_year(day(2025, 12, 31)), 2025);
        assert_eq!(base_year(day(2026, 1, 1)), 2027);
    }

    #[test]
    fn test_phase_for() {
        assert_eq!(phase_for(day(2025, 10, 15), 2025), Phase::October);
        assert_eq!(phase_for(day(2025, 3, 1), 2026), Phase::PrePlanning);
        // Archived December: planning next year already.
        assert_eq!(phase_for(day(2025, 12, 28), 2026), Phase::PrePlanning);
        assert_eq!(phase_for(day(2026, 3, 1), 2026), Phase::PrePlanning);
    }

    #[test]
    fn test_days_until_christmas() {
        assert_eq!(days_until_christmas(day(2025, 10, 15), 2025), 71);
        assert_eq!(days_until_christmas(day(2025, 12, 25), 2025), 0);
        assert_eq!(days_until_christmas(day(2025, 12, 28), 2025), -3);
    }

    #[test]
    fn test_default_delivery_year() {
        assert_eq!(default_delivery_year(day(2026, 2, 10)), 2025);
        assert_eq!(default_delivery_year(day(2026, 8, 31)), 2025);
        assert_eq!(default_delivery_year(day(2025, 9, 1)), 2025);
    }

    #[tokio::test]
    async fn test_mid_october_without_archive() {
        let (calendar, _pool) = calendar_on(day(2025, 10, 15)).await;
        assert_eq!(calendar.active_year().await.unwrap(), 2025);
        assert_eq!(calendar.current_phase().await.unwrap(), Phase::October);
        assert_eq!(calendar.days_until_christmas().await.unwrap(), 71);
    }

    #[tokio::test]
    async fn test_spring_plans_next_year() {
        let (calendar, _pool) = calendar_on(day(2025, 3, 1)).await;
        assert_eq!(calendar.active_year().await.unwrap(), 2026);
        assert_eq!(calendar.current_phase().await.unwrap(), Phase::PrePlanning);
    }

    #[tokio::test]
    async fn test_archived_years_are_skipped() {
        let (calendar, pool) = calendar_on(day(2025, 12, 20)).await;
        archive(&pool, 2025).await;
        assert_eq!(calendar.active_year().await.unwrap(), 2026);
        assert_eq!(calendar.current_phase().await.unwrap(), Phase::PrePlanning);

        archive(&pool, 2026).await;
        assert_eq!(calendar.active_year().await.unwrap(), 2027);
    }
}
