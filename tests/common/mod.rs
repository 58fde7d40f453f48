//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::Arc;

use tidings::adapters::sqlite::{create_migrated_test_pool, initialize_database, PoolConfig, SqliteRepositories};
use tidings::domain::models::{CardPreference, GiftIdea, Person, Task, TaskType};
use tidings::domain::ports::{FixedClock, GiftIdeaRepository, PersonRepository, TaskRepository};
use tidings::services::{PlanningService, RolloverEngine};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Fresh in-memory database with every repository.
pub async fn repos() -> SqliteRepositories {
    let pool = create_migrated_test_pool().await.expect("failed to create test database");
    SqliteRepositories::new(&pool)
}

/// File-backed database with a multi-connection pool. Keep the directory
/// alive for the length of the test.
pub async fn file_repos() -> (tempfile::TempDir, SqliteRepositories) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let url = format!("sqlite:{}", dir.path().join("tidings.db").display());
    let pool = initialize_database(&url, Some(PoolConfig::with_max_connections(4)))
        .await
        .expect("failed to create file database");
    (dir, SqliteRepositories::new(&pool))
}

pub fn planning_at(repos: &SqliteRepositories, today: NaiveDate) -> PlanningService {
    PlanningService::new(Arc::new(FixedClock(today)), repos.summaries.clone(), repos.store.clone())
}

pub fn engine_at(repos: &SqliteRepositories, today: NaiveDate) -> RolloverEngine {
    RolloverEngine::new(repos.store.clone(), Arc::new(FixedClock(today)))
}

pub async fn add_person(repos: &SqliteRepositories, name: &str, preference: CardPreference, gift: bool) -> i64 {
    let mut person = Person::new(name).with_card_preference(preference);
    if gift {
        person = person.with_gift(Some(50.0));
    }
    repos.people.create(&person).await.expect("failed to create person")
}

pub async fn add_idea(repos: &SqliteRepositories, person_id: i64, idea: &str, added: NaiveDate) -> i64 {
    repos
        .ideas
        .create(&GiftIdea::new(person_id, idea, added))
        .await
        .expect("failed to create idea")
}

pub async fn complete_task(repos: &SqliteRepositories, person_id: i64, task_type: TaskType, year: i32) -> i64 {
    let mut task = Task::new(Some(person_id), task_type, year);
    task.toggle(day(year, 12, 20));
    repos.tasks.create(&task).await.expect("failed to create task")
}

/// Route service logs to the test writer.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
