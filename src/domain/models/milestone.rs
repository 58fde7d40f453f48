//! Milestone domain model and the fixed per-phase checklist templates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::phase::MilestonePhase;
use crate::domain::errors::{DomainError, DomainResult};

/// Static checklist definition for one milestone phase.
#[derive(Debug)]
pub struct PhaseTemplate {
    pub phase: MilestonePhase,
    pub description: &'static str,
    pub subtasks: &'static [&'static str],
}

const SEPTEMBER: PhaseTemplate = PhaseTemplate {
    phase: MilestonePhase::September,
    description: "Brainstorm gifts and draft card list",
    subtasks: &[
        "Review previous year's gifts and cards",
        "Brainstorm gift ideas for each person getting a gift",
        "Finalize handwritten card list",
        "Finalize e-card recipient list",
    ],
};

const OCTOBER: PhaseTemplate = PhaseTemplate {
    phase: MilestonePhase::October,
    description: "Purchase gifts for family and order physical cards",
    subtasks: &[
        "Purchase all family gifts",
        "Order physical cards from vendor",
        "Confirm card quantities match list",
    ],
};

const NOVEMBER: PhaseTemplate = PhaseTemplate {
    phase: MilestonePhase::November,
    description: "Write handwritten cards and buy colleague gifts",
    subtasks: &[
        "Write all handwritten cards",
        "Purchase all colleague gifts",
        "Wrap family gifts",
    ],
};

const DECEMBER: PhaseTemplate = PhaseTemplate {
    phase: MilestonePhase::December,
    description: "Distribute colleague gifts, send e-cards, and wrap everything",
    subtasks: &[
        "Draft and finalize e-card message",
        "Send e-cards to all recipients",
        "Distribute colleague gifts",
        "Wrap remaining gifts",
        "Deliver/mail all gifts and cards",
    ],
};

pub const MILESTONE_TEMPLATES: &[PhaseTemplate] = &[SEPTEMBER, OCTOBER, NOVEMBER, DECEMBER];

pub fn template_for(phase: MilestonePhase) -> &'static PhaseTemplate {
    match phase {
        MilestonePhase::September => &SEPTEMBER,
        MilestonePhase::October => &OCTOBER,
        MilestonePhase::November => &NOVEMBER,
        MilestonePhase::December => &DECEMBER,
    }
}

pub fn subtasks_for(phase: MilestonePhase) -> &'static [&'static str] {
    template_for(phase).subtasks
}

/// One phase-scoped checklist for a planning year.
///
/// Whenever `subtasks` is non-empty, `completed` mirrors "every subtask index
/// is in `completed_subtasks`". Without subtasks it is a plain manual flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    pub phase: MilestonePhase,
    pub description: String,
    pub year: i32,
    pub completed: bool,
    pub completed_date: Option<NaiveDate>,
    pub subtasks: Vec<String>,
    pub completed_subtasks: BTreeSet<usize>,
    /// Optional reference link (shopping list, planning chat, ...)
    pub link: Option<String>,
}

impl Milestone {
    /// Fresh, uncompleted milestone built from the phase template.
    pub fn from_template(phase: MilestonePhase, year: i32) -> Self {
        let template = template_for(phase);

        Self {
            id: 0,
            phase,
            description: template.description.to_string(),
            year,
            completed: false,
            completed_date: None,
            subtasks: template.subtasks.iter().map(|s| (*s).to_string()).collect(),
            completed_subtasks: BTreeSet::new(),
            link: None,
        }
    }

    /// Replace the completed-index set, dropping indices outside the subtask list.
    pub fn with_completed_subtasks(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        let len = self.subtasks.len();
        self.completed_subtasks = indices.into_iter().filter(|i| *i < len).collect();
        self
    }

    /// (completed, total) subtask counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed_subtasks.len(), self.subtasks.len())
    }

    pub fn all_subtasks_done(&self) -> bool {
        !self.subtasks.is_empty() && self.completed_subtasks.len() == self.subtasks.len()
    }

    /// Toggle one subtask and re-derive the milestone's completion.
    pub fn toggle_subtask(&mut self, index: usize, today: NaiveDate) -> DomainResult<()> {
        if index >= self.subtasks.len() {
            return Err(DomainError::SubtaskOutOfRange {
                milestone_id: self.id,
                index,
                len: self.subtasks.len(),
            });
        }

        let mut next = self.completed_subtasks.clone();
        if !next.remove(&index) {
            next.insert(index);
        }
        self.completed_subtasks = next;

        let done = self.all_subtasks_done();
        if done != self.completed {
            self.set_completed(done, today);
        }
        Ok(())
    }

    /// Manual toggle. With subtasks present this checks or clears all of them
    /// so the derived flag stays consistent.
    pub fn toggle(&mut self, today: NaiveDate) {
        let completed = !self.completed;
        if !self.subtasks.is_empty() {
            self.completed_subtasks = if completed {
                (0..self.subtasks.len()).collect()
            } else {
                BTreeSet::new()
            };
        }
        self.set_completed(completed, today);
    }

    fn set_completed(&mut self, completed: bool, today: NaiveDate) {
        self.completed = completed;
        self.completed_date = completed.then_some(today);
    }
}
