//! Per-person tasks for the active planning year.

use std::sync::Arc;
use tracing::debug;

use super::calendar::PlanningCalendar;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Task, TaskType};
use crate::domain::ports::{PersonRepository, TaskFilter, TaskRepository};

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    people: Arc<dyn PersonRepository>,
    calendar: PlanningCalendar,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, people: Arc<dyn PersonRepository>, calendar: PlanningCalendar) -> Self {
        Self { tasks, people, calendar }
    }

    /// The person's task of this type in the active year, created if missing.
    pub async fn ensure_task(&self, person_id: i64, task_type: TaskType) -> DomainResult<Task> {
        self.people.get(person_id).await?.ok_or(DomainError::PersonNotFound(person_id))?;
        let year = self.calendar.active_year().await?;

        if let Some(existing) = self.tasks.find(person_id, year, &task_type).await? {
            return Ok(existing);
        }

        let mut task = Task::new(Some(person_id), task_type, year);
        task.id = self.tasks.create(&task).await?;
        debug!(task_id = task.id, person_id, year, task_type = %task.task_type, "created task");
        Ok(task)
    }

    pub async fn get_task(&self, id: i64) -> DomainResult<Task> {
        self.tasks.get(id).await?.ok_or(DomainError::TaskNotFound(id))
    }

    pub async fn toggle_task(&self, id: i64) -> DomainResult<Task> {
        let mut task = self.get_task(id).await?;
        task.toggle(self.calendar.today());
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Mark a gift as given, recording what it actually was.
    pub async fn complete_gift(&self, id: i64, actual_gift: Option<String>) -> DomainResult<Task> {
        let mut task = self.get_task(id).await?;
        task.complete_gift(actual_gift, self.calendar.today());
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Completed gifts for a person across all years, newest first.
    pub async fn gift_history(&self, person_id: i64) -> DomainResult<Vec<Task>> {
        self.tasks
            .list(TaskFilter {
                person_id: Some(person_id),
                task_type: Some(TaskType::GiftGiven),
                completed: Some(true),
                ..Default::default()
            })
            .await
    }

    pub async fn tasks_for_person(&self, person_id: i64) -> DomainResult<Vec<Task>> {
        self.tasks
            .list(TaskFilter { person_id: Some(person_id), ..Default::default() })
            .await
    }
}
