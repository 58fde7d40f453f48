//! Planning phases.
//!
//! The household plans one season at a time. January through August is the
//! lead-up ("Pre-planning"); September through December each have their own
//! milestone checklist.

use serde::{Deserialize, Serialize};

/// One of the four months that carry a milestone checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MilestonePhase {
    September,
    October,
    November,
    December,
}

impl MilestonePhase {
    /// Seeding order.
    pub const ALL: [Self; 4] = [Self::September, Self::October, Self::November, Self::December];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "september" => Some(Self::September),
            "october" => Some(Self::October),
            "november" => Some(Self::November),
            "december" => Some(Self::December),
            _ => None,
        }
    }

    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            9 => Some(Self::September),
            10 => Some(Self::October),
            11 => Some(Self::November),
            12 => Some(Self::December),
            _ => None,
        }
    }
}

impl std::fmt::Display for MilestonePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The planner's current state within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Pre-planning")]
    PrePlanning,
    September,
    October,
    November,
    December,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrePlanning => "Pre-planning",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Milestone checklist that is "current" in this phase, if any.
    pub fn milestone_phase(&self) -> Option<MilestonePhase> {
        match self {
            Self::PrePlanning => None,
            Self::September => Some(MilestonePhase::September),
            Self::October => Some(MilestonePhase::October),
            Self::November => Some(MilestonePhase::November),
            Self::December => Some(MilestonePhase::December),
        }
    }
}

impl From<MilestonePhase> for Phase {
    fn from(phase: MilestonePhase) -> Self {
        match phase {
            MilestonePhase::September => Self::September,
            MilestonePhase::October => Self::October,
            MilestonePhase::November => Self::November,
            MilestonePhase::December => Self::December,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
