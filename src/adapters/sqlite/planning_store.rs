//! SQLite implementation of the planning unit of work.
//!
//! One `SqlitePlanningTransaction` wraps one `sqlx::Transaction`. Every query
//! runs on that transaction's connection, so the rollover's summary insert,
//! idea consumption and milestone seeding land together or not at all.
//!
//! Transactions open with `BEGIN IMMEDIATE`, taking the write lock before the
//! first read. A racing rollover waits on the busy timeout, then sees the
//! committed summary instead of failing on a stale snapshot.

use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

use super::format_date;
use super::milestone_repository::insert_milestone;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AnnualSummary, CardPreference, Milestone, MilestonePhase, TaskType};
use crate::domain::ports::{PlanningStore, PlanningTransaction};

#[derive(Clone)]
pub struct SqlitePlanningStore {
    pool: SqlitePool,
}

impl SqlitePlanningStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanningStore for SqlitePlanningStore {
    async fn begin(&self) -> DomainResult<Box<dyn PlanningTransaction>> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(Box::new(SqlitePlanningTransaction { tx: Some(tx) }))
    }

    async fn latest_milestone_year(&self) -> DomainResult<Option<i32>> {
        let year: Option<i32> = sqlx::query_scalar("SELECT MAX(year) FROM milestones")
            .fetch_one(&self.pool)
            .await?;
        Ok(year)
    }
}

/// Open transaction; rolled back on drop unless committed.
pub struct SqlitePlanningTransaction {
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqlitePlanningTransaction {
    fn conn(&mut self) -> DomainResult<&mut SqliteConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| DomainError::DatabaseError("planning transaction already committed".to_string()))
    }
}

#[async_trait]
impl PlanningTransaction for SqlitePlanningTransaction {
    async fn count_active_people(&mut self) -> DomainResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people WHERE active = 1")
            .fetch_one(self.conn()?)
            .await?;
        Ok(count)
    }

    async fn count_completed_tasks(&mut self, year: i32, task_type: &TaskType) -> DomainResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE year = ? AND task_type = ? AND completed = 1")
                .bind(year)
                .bind(task_type.as_str())
                .fetch_one(self.conn()?)
                .await?;
        Ok(count)
    }

    async fn count_completed_cards(&mut self, year: i32, preference: CardPreference) -> DomainResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM tasks t
               JOIN people p ON p.id = t.person_id
               WHERE t.year = ? AND t.task_type = ? AND t.completed = 1 AND p.card_preference = ?"#,
        )
        .bind(year)
        .bind(TaskType::CardWritten.as_str())
        .bind(preference.as_str())
        .fetch_one(self.conn()?)
        .await?;
        Ok(count)
    }

    async fn total_gift_budget(&mut self) -> DomainResult<Option<f64>> {
        let total: Option<f64> =
            sqlx::query_scalar("SELECT SUM(budget) FROM people WHERE active = 1 AND gets_gift = 1")
                .fetch_one(self.conn()?)
                .await?;
        Ok(total)
    }

    async fn summary_exists(&mut self, year: i32) -> DomainResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM annual_summaries WHERE year = ?")
            .bind(year)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(found.is_some())
    }

    async fn insert_summary(&mut self, summary: &AnnualSummary) -> DomainResult<i64> {
        let result = sqlx::query(
            r#"INSERT INTO annual_summaries (year, total_people, gifts_given, handwritten_cards, ecards_sent,
                                             total_budget, completed_date, notes)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(summary.year)
        .bind(summary.total_people)
        .bind(summary.gifts_given)
        .bind(summary.handwritten_cards)
        .bind(summary.ecards_sent)
        .bind(summary.total_budget)
        .bind(format_date(summary.completed_date))
        .bind(&summary.notes)
        .execute(self.conn()?)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::AlreadyArchived(summary.year))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn completed_gift_recipients(&mut self, year: i32) -> DomainResult<Vec<i64>> {
        let people: Vec<i64> = sqlx::query_scalar(
            r#"SELECT person_id FROM tasks
               WHERE year = ? AND task_type = ? AND completed = 1 AND person_id IS NOT NULL
               ORDER BY id"#,
        )
        .bind(year)
        .bind(TaskType::GiftGiven.as_str())
        .fetch_all(self.conn()?)
        .await?;
        Ok(people)
    }

    async fn consume_latest_unused_idea(&mut self, person_id: i64, year: i32) -> DomainResult<Option<i64>> {
        let latest: Option<i64> = sqlx::query_scalar(
            r#"SELECT id FROM gift_ideas
               WHERE person_id = ? AND used_year IS NULL
               ORDER BY added_date DESC, id DESC
               LIMIT 1"#,
        )
        .bind(person_id)
        .fetch_optional(self.conn()?)
        .await?;

        let Some(idea_id) = latest else {
            debug!(person_id, "no unused gift idea to consume");
            return Ok(None);
        };

        sqlx::query("UPDATE gift_ideas SET used_year = ? WHERE id = ?")
            .bind(year)
            .bind(idea_id)
            .execute(self.conn()?)
            .await?;

        debug!(person_id, idea_id, year, "marked gift idea as used");
        Ok(Some(idea_id))
    }

    async fn existing_phases(&mut self, year: i32) -> DomainResult<Vec<MilestonePhase>> {
        let phases: Vec<String> = sqlx::query_scalar("SELECT phase FROM milestones WHERE year = ?")
            .bind(year)
            .fetch_all(self.conn()?)
            .await?;

        phases
            .iter()
            .map(|p| {
                MilestonePhase::from_str(p)
                    .ok_or_else(|| DomainError::SerializationError(format!("Invalid phase: {p}")))
            })
            .collect()
    }

    async fn insert_milestone(&mut self, milestone: &Milestone) -> DomainResult<i64> {
        insert_milestone(self.conn()?, milestone).await
    }

    async fn commit(&mut self) -> DomainResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| DomainError::DatabaseError("planning transaction already committed".to_string()))?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, initialize_database, PoolConfig, SqliteSummaryRepository};
    use crate::domain::models::YearStats;
    use crate::domain::ports::SummaryRepository;
    use chrono::NaiveDate;

    fn summary(year: i32) -> AnnualSummary {
        AnnualSummary::new(year, YearStats::default(), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap())
    }

    #[tokio::test]
    async fn test_commit_makes_writes_visible() {
        let pool = create_migrated_test_pool().await.unwrap();
        let store = SqlitePlanningStore::new(pool.clone());

        let mut tx = store.begin().await.unwrap();
        tx.insert_summary(&summary(2025)).await.unwrap();
        assert!(tx.summary_exists(2025).await.unwrap());
        tx.commit().await.unwrap();

        assert!(SqliteSummaryRepository::new(pool).exists(2025).await.unwrap());
    }

    #[tokio::test]
    async fn test_drop_without_commit_rolls_back() {
        let pool = create_migrated_test_pool().await.unwrap();
        let store = SqlitePlanningStore::new(pool.clone());

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_summary(&summary(2025)).await.unwrap();
            tx.insert_milestone(&Milestone::from_template(MilestonePhase::September, 2026))
                .await
                .unwrap();
        }

        assert_eq!(store.latest_milestone_year().await.unwrap(), None);
        let mut tx = store.begin().await.unwrap();
        assert!(!tx.summary_exists(2025).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_summary_is_already_archived() {
        let pool = create_migrated_test_pool().await.unwrap();
        let store = SqlitePlanningStore::new(pool);

        let mut tx = store.begin().await.unwrap();
        tx.insert_summary(&summary(2025)).await.unwrap();
        let err = tx.insert_summary(&summary(2025)).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyArchived(2025)));
    }

    #[tokio::test]
    async fn test_use_after_commit_fails() {
        let pool = create_migrated_test_pool().await.unwrap();
        let store = SqlitePlanningStore::new(pool);

        let mut tx = store.begin().await.unwrap();
        tx.commit().await.unwrap();
        assert!(matches!(tx.count_active_people().await, Err(DomainError::DatabaseError(_))));
        assert!(tx.commit().await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_second_transaction_waits_for_writer() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("tidings.db").display());
        let pool = initialize_database(&url, Some(PoolConfig::with_max_connections(2))).await.unwrap();
        let store = SqlitePlanningStore::new(pool);

        let mut writer = store.begin().await.unwrap();
        assert!(!writer.summary_exists(2025).await.unwrap());

        let racer = tokio::spawn({
            let store = store.clone();
            async move {
                let mut tx = store.begin().await?;
                if tx.summary_exists(2025).await? {
                    return Err(DomainError::AlreadyArchived(2025));
                }
                tx.insert_summary(&summary(2025)).await
            }
        });

        writer.insert_summary(&summary(2025)).await.unwrap();
        writer
            .insert_milestone(&Milestone::from_template(MilestonePhase::September, 2026))
            .await
            .unwrap();
        writer.commit().await.unwrap();

        let outcome = racer.await.unwrap();
        assert!(matches!(outcome, Err(DomainError::AlreadyArchived(2025))), "{outcome:?}");
        assert_eq!(store.latest_milestone_year().await.unwrap(), Some(2026));
    }
}
