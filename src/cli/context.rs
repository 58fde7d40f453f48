//! Service wiring shared by every command.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use crate::adapters::sqlite::{
    initialize_database, PoolConfig, SqliteGiftIdeaRepository, SqlitePersonRepository, SqliteRepositories,
};
use crate::domain::models::Config;
use crate::domain::ports::{Clock, SystemClock};
use crate::services::{
    DashboardService, DashboardSources, EcardService, GiftIdeaService, MilestoneService, PersonService,
    PlanningService, TaskService,
};

/// An open, migrated database with every service built on top of it.
pub struct AppContext {
    pub pool: SqlitePool,
    pub planning: PlanningService,
    pub people: PersonService<SqlitePersonRepository>,
    pub ideas: GiftIdeaService<SqlitePersonRepository, SqliteGiftIdeaRepository>,
    pub tasks: TaskService,
    pub milestones: MilestoneService,
    pub ecards: EcardService,
    pub dashboard: DashboardService,
}

impl AppContext {
    /// Open the configured database, applying pending migrations.
    pub async fn open(config: &Config) -> Result<Self> {
        let url = config.database.url();
        let pool_config = PoolConfig::with_max_connections(config.database.max_connections);
        let pool = initialize_database(&url, Some(pool_config))
            .await
            .with_context(|| format!("Failed to open database at {}. Run 'tidings init' first.", config.database.path))?;
        debug!(database = %config.database.path, "database ready");

        Ok(Self::with_clock(pool, Arc::new(SystemClock)))
    }

    /// Build the services over an existing pool with the given clock.
    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        let repos = SqliteRepositories::new(&pool);
        let planning = PlanningService::new(clock.clone(), repos.summaries.clone(), repos.store.clone());
        let calendar = planning.calendar().clone();

        let sources = DashboardSources {
            people: repos.people.clone(),
            ideas: repos.ideas.clone(),
            tasks: repos.tasks.clone(),
            milestones: repos.milestones.clone(),
            summaries: repos.summaries.clone(),
            deliveries: repos.deliveries.clone(),
        };

        Self {
            people: PersonService::new(repos.people.clone()),
            ideas: GiftIdeaService::new(repos.people.clone(), repos.ideas.clone(), clock.clone()),
            tasks: TaskService::new(repos.tasks.clone(), repos.people.clone(), calendar.clone()),
            milestones: MilestoneService::new(repos.milestones.clone(), calendar),
            ecards: EcardService::new(repos.deliveries.clone(), repos.people.clone(), clock),
            dashboard: DashboardService::new(planning.clone(), sources),
            planning,
            pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use crate::domain::models::Phase;
    use crate::domain::ports::FixedClock;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_context_services_share_clock() {
        let pool = create_migrated_test_pool().await.unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let ctx = AppContext::with_clock(pool, Arc::new(FixedClock(today)));

        assert_eq!(ctx.planning.resolve_active_year().await.unwrap(), 2025);
        assert_eq!(ctx.planning.resolve_current_phase().await.unwrap(), Phase::November);

        let dashboard = ctx.dashboard.snapshot().await.unwrap();
        assert_eq!(dashboard.milestones.len(), 4);
        let (year, milestones) = ctx.milestones.active_milestones().await.unwrap();
        assert_eq!(year, 2025);
        assert_eq!(milestones.len(), 4);
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("nested/tidings.db").to_string_lossy().into_owned();

        let ctx = AppContext::open(&config).await.unwrap();
        assert!(dir.path().join("nested/tidings.db").exists());
        ctx.pool.close().await;
    }
}
