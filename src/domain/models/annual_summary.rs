//! Archived-year records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistics captured when a planning year is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearStats {
    pub total_people: i64,
    pub gifts_given: i64,
    pub handwritten_cards: i64,
    pub ecards_sent: i64,
}

/// One row per archived year. Its existence closes the year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub id: i64,
    pub year: i32,
    pub total_people: i64,
    pub gifts_given: i64,
    pub handwritten_cards: i64,
    pub ecards_sent: i64,
    pub total_budget: Option<f64>,
    pub completed_date: NaiveDate,
    pub notes: Option<String>,
}

impl AnnualSummary {
    pub fn new(year: i32, stats: YearStats, completed_date: NaiveDate) -> Self {
        Self {
            id: 0,
            year,
            total_people: stats.total_people,
            gifts_given: stats.gifts_given,
            handwritten_cards: stats.handwritten_cards,
            ecards_sent: stats.ecards_sent,
            total_budget: None,
            completed_date,
            notes: None,
        }
    }

    pub fn with_total_budget(mut self, total_budget: Option<f64>) -> Self {
        self.total_budget = total_budget;
        self
    }

    pub fn stats(&self) -> YearStats {
        YearStats {
            total_people: self.total_people,
            gifts_given: self.gifts_given,
            handwritten_cards: self.handwritten_cards,
            ecards_sent: self.ecards_sent,
        }
    }
}

/// What the caller shows the user after a year has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverSummary {
    pub year: i32,
    pub total_people: i64,
    pub gifts_given: i64,
    pub handwritten_cards: i64,
    pub ecards_sent: i64,
}

impl RolloverSummary {
    pub fn new(year: i32, stats: YearStats) -> Self {
        Self {
            year,
            total_people: stats.total_people,
            gifts_given: stats.gifts_given,
            handwritten_cards: stats.handwritten_cards,
            ecards_sent: stats.ecards_sent,
        }
    }
}

impl From<&AnnualSummary> for RolloverSummary {
    fn from(summary: &AnnualSummary) -> Self {
        Self::new(summary.year, summary.stats())
    }
}
