//! SQLite implementation of the MilestoneRepository.

use async_trait::async_trait;
use sqlx::{SqliteExecutor, SqlitePool};

use super::{format_date, parse_json_or_default, parse_optional_date};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Milestone, MilestonePhase};
use crate::domain::ports::MilestoneRepository;

const MILESTONE_COLUMNS: &str =
    "id, phase, description, completed, completed_date, year, subtasks, completed_subtasks, link";

#[derive(Clone)]
pub struct SqliteMilestoneRepository {
    pool: SqlitePool,
}

impl SqliteMilestoneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Insert a milestone through any executor (pool or open transaction).
pub(super) async fn insert_milestone<'e>(executor: impl SqliteExecutor<'e>, milestone: &Milestone) -> DomainResult<i64> {
    let subtasks_json = serde_json::to_string(&milestone.subtasks)?;
    let completed_json = serde_json::to_string(&milestone.completed_subtasks)?;

    let result = sqlx::query(
        r#"INSERT INTO milestones (phase, description, completed, completed_date, year, subtasks, completed_subtasks, link)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(milestone.phase.as_str())
    .bind(&milestone.description)
    .bind(milestone.completed)
    .bind(milestone.completed_date.map(format_date))
    .bind(milestone.year)
    .bind(&subtasks_json)
    .bind(&completed_json)
    .bind(&milestone.link)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

#[async_trait]
impl MilestoneRepository for SqliteMilestoneRepository {
    async fn get(&self, id: i64) -> DomainResult<Option<Milestone>> {
        let row: Option<MilestoneRow> =
            sqlx::query_as(&format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn get_for_phase(&self, year: i32, phase: MilestonePhase) -> DomainResult<Option<Milestone>> {
        let row: Option<MilestoneRow> = sqlx::query_as(&format!(
            "SELECT {MILESTONE_COLUMNS} FROM milestones WHERE year = ? AND phase = ?"
        ))
        .bind(year)
        .bind(phase.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn list_for_year(&self, year: i32) -> DomainResult<Vec<Milestone>> {
        let rows: Vec<MilestoneRow> =
            sqlx::query_as(&format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE year = ?"))
                .bind(year)
                .fetch_all(&self.pool)
                .await?;

        let mut milestones = rows
            .into_iter()
            .map(Milestone::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        milestones.sort_by_key(|m| m.phase);
        Ok(milestones)
    }

    async fn update(&self, milestone: &Milestone) -> DomainResult<()> {
        let completed_json = serde_json::to_string(&milestone.completed_subtasks)?;

        let result = sqlx::query(
            r#"UPDATE milestones SET completed = ?, completed_date = ?, completed_subtasks = ?, link = ?
               WHERE id = ?"#,
        )
        .bind(milestone.completed)
        .bind(milestone.completed_date.map(format_date))
        .bind(&completed_json)
        .bind(&milestone.link)
        .bind(milestone.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MilestoneNotFound(milestone.id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct MilestoneRow {
    id: i64,
    phase: String,
    description: String,
    completed: bool,
    completed_date: Option<String>,
    year: i32,
    subtasks: Option<String>,
    completed_subtasks: Option<String>,
    link: Option<String>,
}

impl TryFrom<MilestoneRow> for Milestone {
    type Error = DomainError;

    fn try_from(row: MilestoneRow) -> Result<Self, Self::Error> {
        let phase = MilestonePhase::from_str(&row.phase)
            .ok_or_else(|| DomainError::SerializationError(format!("Invalid phase: {}", row.phase)))?;

        let subtasks: Vec<String> = parse_json_or_default(row.subtasks)?;
        let completed_subtasks: Vec<usize> = parse_json_or_default(row.completed_subtasks)?;

        let milestone = Milestone {
            id: row.id,
            phase,
            description: row.description,
            year: row.year,
            completed: row.completed,
            completed_date: parse_optional_date(row.completed_date)?,
            subtasks,
            completed_subtasks: Default::default(),
            link: row.link,
        };
        Ok(milestone.with_completed_subtasks(completed_subtasks))
    }
}
