//! SQLite database adapters for the Tidings planner.

pub mod connection;
pub mod ecard_delivery_repository;
pub mod gift_idea_repository;
pub mod migrations;
pub mod milestone_repository;
pub mod person_repository;
pub mod planning_store;
pub mod summary_repository;
pub mod task_repository;

pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use ecard_delivery_repository::SqliteEcardDeliveryRepository;
pub use gift_idea_repository::SqliteGiftIdeaRepository;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use milestone_repository::SqliteMilestoneRepository;
pub use person_repository::SqlitePersonRepository;
pub use planning_store::{SqlitePlanningStore, SqlitePlanningTransaction};
pub use summary_repository::SqliteSummaryRepository;
pub use task_repository::SqliteTaskRepository;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};

/// Storage format for calendar dates (sorts correctly as text).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date from a SQLite row field.
pub fn parse_date(s: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| DomainError::SerializationError(e.to_string()))
}

/// Parse an optional `YYYY-MM-DD` date from a SQLite row field.
pub fn parse_optional_date(s: Option<String>) -> DomainResult<Option<NaiveDate>> {
    s.map(|s| parse_date(&s)).transpose()
}

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| DomainError::SerializationError(e.to_string()))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a JSON string from a SQLite row field, falling back to the type's default.
pub fn parse_json_or_default<T: serde::de::DeserializeOwned + Default>(s: Option<String>) -> DomainResult<T> {
    s.filter(|s| !s.trim().is_empty())
        .map(|s| serde_json::from_str(&s))
        .transpose()
        .map_err(|e| DomainError::SerializationError(e.to_string()))
        .map(|opt| opt.unwrap_or_default())
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

pub async fn initialize_database(database_url: &str, config: Option<PoolConfig>) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, config).await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}

/// Every SQLite repository over one pool.
#[derive(Clone)]
pub struct SqliteRepositories {
    pub people: Arc<SqlitePersonRepository>,
    pub ideas: Arc<SqliteGiftIdeaRepository>,
    pub tasks: Arc<SqliteTaskRepository>,
    pub milestones: Arc<SqliteMilestoneRepository>,
    pub summaries: Arc<SqliteSummaryRepository>,
    pub deliveries: Arc<SqliteEcardDeliveryRepository>,
    pub store: Arc<SqlitePlanningStore>,
}

impl SqliteRepositories {
    pub fn new(pool: &SqlitePool) -> Self {
        Self {
            people: Arc::new(SqlitePersonRepository::new(pool.clone())),
            ideas: Arc::new(SqliteGiftIdeaRepository::new(pool.clone())),
            tasks: Arc::new(SqliteTaskRepository::new(pool.clone())),
            milestones: Arc::new(SqliteMilestoneRepository::new(pool.clone())),
            summaries: Arc::new(SqliteSummaryRepository::new(pool.clone())),
            deliveries: Arc::new(SqliteEcardDeliveryRepository::new(pool.clone())),
            store: Arc::new(SqlitePlanningStore::new(pool.clone())),
        }
    }
}
