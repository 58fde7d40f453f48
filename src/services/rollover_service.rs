//! Year close: archive statistics, consume gift ideas, seed the next year.

use std::sync::Arc;
use tracing::{info, instrument};

use super::milestone_seeder::seed_in;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AnnualSummary, CardPreference, RolloverSummary, TaskType, YearStats};
use crate::domain::ports::{Clock, PlanningStore, PlanningTransaction};

#[derive(Clone)]
pub struct RolloverEngine {
    store: Arc<dyn PlanningStore>,
    clock: Arc<dyn Clock>,
}

impl RolloverEngine {
    pub fn new(store: Arc<dyn PlanningStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Archive `old_year` and open `new_year` in one transaction.
    ///
    /// Fails with `AlreadyArchived(old_year)` if the year already has a
    /// summary; in that case nothing is written.
    #[instrument(skip(self))]
    pub async fn perform_rollover(&self, old_year: i32, new_year: i32) -> DomainResult<RolloverSummary> {
        let mut tx = self.store.begin().await?;
        let outcome = self.rollover_in(tx.as_mut(), old_year, new_year).await?;
        tx.commit().await?;

        info!(
            year = old_year,
            next_year = new_year,
            gifts_given = outcome.summary.gifts_given,
            ideas_consumed = outcome.ideas_consumed,
            milestones_seeded = outcome.milestones_seeded,
            "archived planning year"
        );
        Ok(outcome.summary)
    }

    async fn rollover_in(
        &self,
        tx: &mut dyn PlanningTransaction,
        old_year: i32,
        new_year: i32,
    ) -> DomainResult<RolloverOutcome> {
        if tx.summary_exists(old_year).await? {
            return Err(DomainError::AlreadyArchived(old_year));
        }

        let stats = collect_stats(tx, old_year).await?;
        let total_budget = tx.total_gift_budget().await?;
        let summary = AnnualSummary::new(old_year, stats, self.clock.today()).with_total_budget(total_budget);
        tx.insert_summary(&summary).await?;

        let mut ideas_consumed = 0;
        for person_id in tx.completed_gift_recipients(old_year).await? {
            if tx.consume_latest_unused_idea(person_id, old_year).await?.is_some() {
                ideas_consumed += 1;
            }
        }

        let milestones_seeded = seed_in(tx, new_year).await?;

        Ok(RolloverOutcome {
            summary: RolloverSummary::new(old_year, stats),
            ideas_consumed,
            milestones_seeded,
        })
    }
}

struct RolloverOutcome {
    summary: RolloverSummary,
    ideas_consumed: usize,
    milestones_seeded: usize,
}

async fn collect_stats(tx: &mut dyn PlanningTransaction, year: i32) -> DomainResult<YearStats> {
    Ok(YearStats {
        total_people: tx.count_active_people().await?,
        gifts_given: tx.count_completed_tasks(year, &TaskType::GiftGiven).await?,
        handwritten_cards: tx.count_completed_cards(year, CardPreference::Handwritten).await?,
        ecards_sent: tx.count_completed_cards(year, CardPreference::ECard).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteRepositories};
    use crate::domain::models::{GiftIdea, Person, Task};
    use crate::domain::ports::{
        FixedClock, GiftIdeaRepository, MilestoneRepository, PersonRepository, SummaryRepository, TaskRepository,
    };
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (RolloverEngine, SqliteRepositories) {
        let pool = create_migrated_test_pool().await.unwrap();
        let repos = SqliteRepositories::new(&pool);
        let engine = RolloverEngine::new(repos.store.clone(), Arc::new(FixedClock(day(2026, 1, 3))));
        (engine, repos)
    }

    async fn completed_task(repos: &SqliteRepositories, person_id: i64, task_type: TaskType, year: i32) {
        let mut task = Task::new(Some(person_id), task_type, year);
        task.toggle(day(year, 12, 20));
        repos.tasks.create(&task).await.unwrap();
    }

    #[tokio::test]
    async fn test_rollover_collects_stats() {
        let (engine, repos) = setup().await;
        let ann = repos
            .people
            .create(&Person::new("Ann").with_card_preference(CardPreference::Handwritten).with_gift(Some(30.0)))
            .await
            .unwrap();
        let bob = repos.people.create(&Person::new("Bob")).await.unwrap();
        let mut gone = Person::new("Cy");
        gone.active = false;
        repos.people.create(&gone).await.unwrap();

        completed_task(&repos, ann, TaskType::GiftGiven, 2025).await;
        completed_task(&repos, ann, TaskType::CardWritten, 2025).await;
        completed_task(&repos, bob, TaskType::CardWritten, 2025).await;
        completed_task(&repos, bob, TaskType::CardWritten, 2024).await;
        repos.tasks.create(&Task::new(Some(bob), TaskType::GiftGiven, 2025)).await.unwrap();

        let summary = engine.perform_rollover(2025, 2026).await.unwrap();
        assert_eq!(
            summary,
            RolloverSummary {
                year: 2025,
                total_people: 2,
                gifts_given: 1,
                handwritten_cards: 1,
                ecards_sent: 1,
            }
        );

        let stored = repos.summaries.get(2025).await.unwrap().unwrap();
        assert_eq!(stored.total_budget, Some(30.0));
        assert_eq!(stored.completed_date, day(2026, 1, 3));
        assert_eq!(repos.milestones.list_for_year(2026).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_rollover_consumes_latest_unused_idea() {
        let (engine, repos) = setup().await;
        let ann = repos.people.create(&Person::new("Ann").with_gift(None)).await.unwrap();
        let january = repos.ideas.create(&GiftIdea::new(ann, "Book", day(2025, 1, 1))).await.unwrap();
        let june = repos.ideas.create(&GiftIdea::new(ann, "Scarf", day(2025, 6, 1))).await.unwrap();
        completed_task(&repos, ann, TaskType::GiftGiven, 2025).await;

        engine.perform_rollover(2025, 2026).await.unwrap();

        assert_eq!(repos.ideas.get(june).await.unwrap().unwrap().used_year, Some(2025));
        assert_eq!(repos.ideas.get(january).await.unwrap().unwrap().used_year, None);
    }

    #[tokio::test]
    async fn test_second_rollover_is_already_archived() {
        let (engine, repos) = setup().await;
        engine.perform_rollover(2025, 2026).await.unwrap();

        let err = engine.perform_rollover(2025, 2026).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyArchived(2025)));
        assert_eq!(repos.summaries.list().await.unwrap().len(), 1);
        assert_eq!(repos.milestones.list_for_year(2026).await.unwrap().len(), 4);
    }
}
