//! SQLite implementation of the TaskRepository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{format_date, parse_optional_date};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Task, TaskType};
use crate::domain::ports::{TaskFilter, TaskRepository};

const TASK_COLUMNS: &str = "id, person_id, task_type, description, completed, completed_date, year, actual_gift";

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TaskFilter) {
    if let Some(person_id) = filter.person_id {
        qb.push(" AND person_id = ").push_bind(person_id);
    }
    if let Some(year) = filter.year {
        qb.push(" AND year = ").push_bind(year);
    }
    if let Some(task_type) = &filter.task_type {
        qb.push(" AND task_type = ").push_bind(task_type.as_str().to_string());
    }
    if let Some(completed) = filter.completed {
        qb.push(" AND completed = ").push_bind(completed);
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &Task) -> DomainResult<i64> {
        let result = sqlx::query(
            r#"INSERT INTO tasks (person_id, task_type, description, completed, completed_date, year, actual_gift)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(task.person_id)
        .bind(task.task_type.as_str())
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.completed_date.map(format_date))
        .bind(task.year)
        .bind(&task.actual_gift)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn update(&self, task: &Task) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE tasks SET description = ?, completed = ?, completed_date = ?, actual_gift = ?
               WHERE id = ?"#,
        )
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.completed_date.map(format_date))
        .bind(&task.actual_gift)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(task.id));
        }

        Ok(())
    }

    async fn find(&self, person_id: i64, year: i32, task_type: &TaskType) -> DomainResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE person_id = ? AND year = ? AND task_type = ? ORDER BY id LIMIT 1"
        ))
        .bind(person_id)
        .bind(year)
        .bind(task_type.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn list(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {TASK_COLUMNS} FROM tasks WHERE 1=1"));
        push_filter(&mut qb, &filter);
        qb.push(" ORDER BY year DESC, id");

        let rows: Vec<TaskRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn count(&self, filter: TaskFilter) -> DomainResult<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM tasks WHERE 1=1");
        push_filter(&mut qb, &filter);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    person_id: Option<i64>,
    task_type: String,
    description: Option<String>,
    completed: bool,
    completed_date: Option<String>,
    year: i32,
    actual_gift: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: row.id,
            person_id: row.person_id,
            task_type: TaskType::parse(&row.task_type),
            description: row.description,
            completed: row.completed,
            completed_date: parse_optional_date(row.completed_date)?,
            year: row.year,
            actual_gift: row.actual_gift,
        })
    }
}
