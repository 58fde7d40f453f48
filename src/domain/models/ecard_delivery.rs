//! E-card delivery records, as reported by the e-card vendor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Vendor status that means the contact details need fixing.
pub const BOUNCED_STATUS: &str = "Bounced";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Email,
    Sms,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "email" => Some(Self::Email),
            "sms" | "phone" => Some(Self::Sms),
            _ => None,
        }
    }

    /// Guess the contact type from the address itself.
    pub fn detect(contact: &str) -> Self {
        if contact.contains('@') {
            Self::Email
        } else {
            Self::Sms
        }
    }
}

/// Delivery outcome for one e-card sent to one contact in one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcardDelivery {
    pub id: i64,
    pub person_id: i64,
    pub year: i32,
    pub status: String,
    pub contact_used: String,
    pub contact_type: ContactType,
    /// Reply the recipient left on the card, if any
    pub message: Option<String>,
    pub imported_date: NaiveDate,
}

impl EcardDelivery {
    pub fn is_bounced(&self) -> bool {
        self.status.eq_ignore_ascii_case(BOUNCED_STATUS)
    }

    pub fn has_message(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.trim().is_empty())
    }
}

/// Per-season delivery counts shown on the archive page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub total_deliveries: i64,
    pub messages_received: i64,
    pub bounced: i64,
}
