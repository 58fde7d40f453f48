//! Per-year task domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Free-form task tag. The planner attaches meaning to three of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    GiftPurchased,
    CardWritten,
    GiftGiven,
    Other(String),
}

impl TaskType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GiftPurchased => "gift_purchased",
            Self::CardWritten => "card_written",
            Self::GiftGiven => "gift_given",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a tag; anything unknown is kept verbatim.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "gift_purchased" => Self::GiftPurchased,
            "card_written" => Self::CardWritten,
            "gift_given" => Self::GiftGiven,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of yearly work, usually scoped to one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    /// `None` for year-level tasks
    pub person_id: Option<i64>,
    pub task_type: TaskType,
    pub description: Option<String>,
    pub completed: bool,
    pub completed_date: Option<NaiveDate>,
    pub year: i32,
    /// What was actually given, recorded when a gift task completes
    pub actual_gift: Option<String>,
}

impl Task {
    pub fn new(person_id: Option<i64>, task_type: TaskType, year: i32) -> Self {
        let description = Some(format!("{task_type} for {year}"));
        Self {
            id: 0,
            person_id,
            task_type,
            description,
            completed: false,
            completed_date: None,
            year,
            actual_gift: None,
        }
    }

    /// Flip completion, stamping or clearing the completion date.
    pub fn toggle(&mut self, today: NaiveDate) {
        self.completed = !self.completed;
        self.completed_date = self.completed.then_some(today);
    }

    /// Mark a gift as given with an optional description of the gift.
    pub fn complete_gift(&mut self, actual_gift: Option<String>, today: NaiveDate) {
        self.completed = true;
        self.completed_date = Some(today);
        self.actual_gift = actual_gift.filter(|g| !g.trim().is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_type_parse() {
        assert_eq!(TaskType::parse("gift_given"), TaskType::GiftGiven);
        assert_eq!(TaskType::parse("card_written"), TaskType::CardWritten);
        assert_eq!(
            TaskType::parse("bake_cookies"),
            TaskType::Other("bake_cookies".to_string())
        );
        assert_eq!(TaskType::Other("bake_cookies".into()).as_str(), "bake_cookies");
    }

    #[test]
    fn test_new_task_description() {
        let task = Task::new(Some(3), TaskType::CardWritten, 2025);
        assert_eq!(task.description.as_deref(), Some("card_written for 2025"));
        assert!(!task.completed);
    }

    #[test]
    fn test_toggle_sets_and_clears_date() {
        let mut task = Task::new(Some(1), TaskType::GiftPurchased, 2025);
        task.toggle(day(2025, 11, 2));
        assert!(task.completed);
        assert_eq!(task.completed_date, Some(day(2025, 11, 2)));
        task.toggle(day(2025, 11, 3));
        assert!(!task.completed);
        assert_eq!(task.completed_date, None);
    }

    #[test]
    fn test_complete_gift_ignores_blank_description() {
        let mut task = Task::new(Some(1), TaskType::GiftGiven, 2025);
        task.complete_gift(Some("  ".to_string()), day(2025, 12, 24));
        assert!(task.completed);
        assert_eq!(task.actual_gift, None);

        task.complete_gift(Some("Scarf".to_string()), day(2025, 12, 25));
        assert_eq!(task.actual_gift.as_deref(), Some("Scarf"));
    }
}
