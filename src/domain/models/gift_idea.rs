//! Gift idea domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A free-form gift suggestion for one person.
///
/// `used_year` is set by the rollover that consumes the idea and is never
/// cleared afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftIdea {
    pub id: i64,
    pub person_id: i64,
    pub idea: String,
    pub notes: Option<String>,
    pub added_date: NaiveDate,
    pub used_year: Option<i32>,
}

impl GiftIdea {
    pub fn new(person_id: i64, idea: impl Into<String>, added_date: NaiveDate) -> Self {
        Self {
            id: 0,
            person_id,
            idea: idea.into(),
            notes: None,
            added_date,
            used_year: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }

    pub fn is_used(&self) -> bool {
        self.used_year.is_some()
    }
}
