//! Creates the September..December checklist for a year.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Milestone, MilestonePhase};
use crate::domain::ports::{PlanningStore, PlanningTransaction};

/// Insert the missing phases for `year` inside an open transaction.
/// Existing rows are left as they are. Returns how many rows were created.
pub async fn seed_in(tx: &mut dyn PlanningTransaction, year: i32) -> DomainResult<usize> {
    let existing = tx.existing_phases(year).await?;
    let mut created = 0;

    for phase in MilestonePhase::ALL {
        if existing.contains(&phase) {
            debug!(year, %phase, "milestone already present");
            continue;
        }
        tx.insert_milestone(&Milestone::from_template(phase, year)).await?;
        created += 1;
    }

    Ok(created)
}

#[derive(Clone)]
pub struct MilestoneSeeder {
    store: Arc<dyn PlanningStore>,
}

impl MilestoneSeeder {
    pub fn new(store: Arc<dyn PlanningStore>) -> Self {
        Self { store }
    }

    /// Seed `year` in its own transaction.
    pub async fn seed(&self, year: i32) -> DomainResult<usize> {
        let mut tx = self.store.begin().await?;
        let created = seed_in(tx.as_mut(), year).await?;
        tx.commit().await?;

        if created > 0 {
            info!(year, created, "seeded milestones");
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteMilestoneRepository, SqlitePlanningStore};
    use crate::domain::ports::MilestoneRepository;
    use chrono::NaiveDate;

    async fn setup() -> (MilestoneSeeder, SqliteMilestoneRepository) {
        let pool = create_migrated_test_pool().await.unwrap();
        (
            MilestoneSeeder::new(Arc::new(SqlitePlanningStore::new(pool.clone()))),
            SqliteMilestoneRepository::new(pool),
        )
    }

    #[tokio::test]
    async fn test_seed_twice_creates_four_rows() {
        let (seeder, milestones) = setup().await;

        assert_eq!(seeder.seed(2025).await.unwrap(), 4);
        assert_eq!(seeder.seed(2025).await.unwrap(), 0);

        let rows = milestones.list_for_year(2025).await.unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|m| !m.completed && m.completed_subtasks.is_empty()));
        assert_eq!(rows[3].subtasks.len(), 5);
    }

    #[tokio::test]
    async fn test_reseed_keeps_manual_progress() {
        let (seeder, milestones) = setup().await;
        seeder.seed(2025).await.unwrap();

        let mut october = milestones.get_for_phase(2025, MilestonePhase::October).await.unwrap().unwrap();
        october.toggle(NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
        milestones.update(&october).await.unwrap();

        assert_eq!(seeder.seed(2025).await.unwrap(), 0);
        let stored = milestones.get(october.id).await.unwrap().unwrap();
        assert!(stored.completed);
        assert_eq!(stored.completed_subtasks.len(), 3);
    }

    #[tokio::test]
    async fn test_partial_year_is_completed() {
        let (seeder, milestones) = setup().await;
        {
            let mut tx = seeder.store.begin().await.unwrap();
            tx.insert_milestone(&Milestone::from_template(MilestonePhase::November, 2025))
                .await
                .unwrap();
            tx.commit().await.unwrap();
        }

        assert_eq!(seeder.seed(2025).await.unwrap(), 3);
        assert_eq!(milestones.list_for_year(2025).await.unwrap().len(), 4);
    }
}
