//! Task repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Task, TaskType};

/// Filters for querying tasks
#[derive(Default, Debug, Clone)]
pub struct TaskFilter {
    pub person_id: Option<i64>,
    pub year: Option<i32>,
    pub task_type: Option<TaskType>,
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// Completed tasks of one type in one year.
    pub fn completed(year: i32, task_type: TaskType) -> Self {
        Self {
            year: Some(year),
            task_type: Some(task_type),
            completed: Some(true),
            ..Default::default()
        }
    }
}

/// Repository port for task persistence operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &Task) -> DomainResult<i64>;

    async fn get(&self, id: i64) -> DomainResult<Option<Task>>;

    async fn update(&self, task: &Task) -> DomainResult<()>;

    /// The task for (person, year, type), if one exists.
    async fn find(&self, person_id: i64, year: i32, task_type: &TaskType) -> DomainResult<Option<Task>>;

    /// List tasks, newest year first.
    async fn list(&self, filter: TaskFilter) -> DomainResult<Vec<Task>>;

    async fn count(&self, filter: TaskFilter) -> DomainResult<i64>;
}
