//! Person repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CardPreference, Person, PersonType};

/// Filter criteria for listing people.
#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
    pub active: Option<bool>,
    pub person_type: Option<PersonType>,
    pub card_preference: Option<CardPreference>,
    pub gets_gift: Option<bool>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PersonFilter {
    /// Only people who have not been removed.
    pub fn active() -> Self {
        Self {
            active: Some(true),
            ..Default::default()
        }
    }
}

/// Repository interface for Person persistence.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a person, returning the assigned id.
    async fn create(&self, person: &Person) -> DomainResult<i64>;

    async fn get(&self, id: i64) -> DomainResult<Option<Person>>;

    async fn update(&self, person: &Person) -> DomainResult<()>;

    /// List people matching the filter, ordered by name.
    async fn list(&self, filter: PersonFilter) -> DomainResult<Vec<Person>>;

    async fn count(&self, filter: PersonFilter) -> DomainResult<i64>;

    /// Sum of budgets over active gift recipients.
    async fn total_gift_budget(&self) -> DomainResult<f64>;
}
