//! Person domain model.
//!
//! People are the recipients of gifts and cards. They are never hard-deleted
//! while ideas or tasks reference them; removal flips `active` off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relationship category, used for filtering and list grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PersonType {
    Family,
    CloseFriend,
    ColleagueDirectReport,
    ColleaguePeer,
    ColleagueOther,
    Professional,
    #[default]
    Other,
}

impl PersonType {
    pub const ALL: [Self; 7] = [
        Self::Family,
        Self::CloseFriend,
        Self::ColleagueDirectReport,
        Self::ColleaguePeer,
        Self::ColleagueOther,
        Self::Professional,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::CloseFriend => "Close Friend",
            Self::ColleagueDirectReport => "Colleague - Direct Report",
            Self::ColleaguePeer => "Colleague - Peer",
            Self::ColleagueOther => "Colleague - Other",
            Self::Professional => "Professional",
            Self::Other => "Other",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().to_lowercase() == wanted)
    }
}

/// How a person receives their holiday card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CardPreference {
    Handwritten,
    #[default]
    ECard,
    None,
}

impl CardPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Handwritten => "Handwritten",
            Self::ECard => "E-card",
            Self::None => "None",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "handwritten" => Some(Self::Handwritten),
            "e-card" | "ecard" => Some(Self::ECard),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Someone on the household's gift or card list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub person_type: PersonType,
    pub card_preference: CardPreference,
    /// Whether this person is on the gift list
    pub gets_gift: bool,
    /// Planned gift spend
    pub budget: Option<f64>,
    /// Name to write on the card envelope, when it differs from `name`
    pub card_addressee: Option<String>,
    pub notes: Option<String>,
    /// Soft-delete flag
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            email: None,
            phone: None,
            person_type: PersonType::default(),
            card_preference: CardPreference::default(),
            gets_gift: false,
            budget: None,
            card_addressee: None,
            notes: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_type(mut self, person_type: PersonType) -> Self {
        self.person_type = person_type;
        self
    }

    pub fn with_card_preference(mut self, preference: CardPreference) -> Self {
        self.card_preference = preference;
        self
    }

    pub fn with_gift(mut self, budget: Option<f64>) -> Self {
        self.gets_gift = true;
        self.budget = budget;
        self
    }

    /// Validate the person before it is stored.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Person name cannot be empty".to_string());
        }
        if let Some(budget) = self.budget {
            if budget < 0.0 || !budget.is_finite() {
                return Err(format!("Budget must be a non-negative amount, got {budget}"));
            }
        }
        Ok(())
    }

    /// Name to use on the card envelope.
    pub fn addressee(&self) -> &str {
        self.card_addressee
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// Reduce a phone number to its digits so the same number always compares
/// equal. A leading US country code is dropped. Blank input yields `None`.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        0 => None,
        11 if digits.starts_with('1') => Some(digits[1..].to_string()),
        _ => Some(digits),
    }
}
