//! Gift idea capture.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GiftIdea;
use crate::domain::ports::{Clock, GiftIdeaRepository, PersonRepository};

pub struct GiftIdeaService<P: PersonRepository, G: GiftIdeaRepository> {
    people: Arc<P>,
    ideas: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<P: PersonRepository, G: GiftIdeaRepository> GiftIdeaService<P, G> {
    pub fn new(people: Arc<P>, ideas: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self { people, ideas, clock }
    }

    /// Record an idea for a person, dated today.
    pub async fn add_idea(&self, person_id: i64, idea: &str, notes: Option<&str>) -> DomainResult<GiftIdea> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(DomainError::ValidationFailed("Gift idea cannot be empty".to_string()));
        }
        self.people.get(person_id).await?.ok_or(DomainError::PersonNotFound(person_id))?;

        let mut gift_idea = GiftIdea::new(person_id, idea, self.clock.today());
        if let Some(notes) = notes {
            gift_idea = gift_idea.with_notes(notes.trim());
        }
        gift_idea.id = self.ideas.create(&gift_idea).await?;
        Ok(gift_idea)
    }

    /// Every idea for a person, most recent first.
    pub async fn list_ideas(&self, person_id: i64) -> DomainResult<Vec<GiftIdea>> {
        self.ideas.list_for_person(person_id, false).await
    }

    pub async fn unused_ideas(&self, person_id: i64) -> DomainResult<Vec<GiftIdea>> {
        self.ideas.list_for_person(person_id, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteGiftIdeaRepository, SqlitePersonRepository};
    use crate::domain::models::Person;
    use crate::domain::ports::FixedClock;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_add_and_list_ideas() {
        let pool = create_migrated_test_pool().await.unwrap();
        let people = Arc::new(SqlitePersonRepository::new(pool.clone()));
        let ann = people.create(&Person::new("Ann")).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let service = GiftIdeaService::new(
            people,
            Arc::new(SqliteGiftIdeaRepository::new(pool)),
            Arc::new(FixedClock(today)),
        );

        let idea = service.add_idea(ann, " Pottery class ", Some("  ")).await.unwrap();
        assert_eq!(idea.idea, "Pottery class");
        assert_eq!(idea.notes, None);
        assert_eq!(idea.added_date, today);

        assert_eq!(service.list_ideas(ann).await.unwrap().len(), 1);
        assert_eq!(service.unused_ideas(ann).await.unwrap().len(), 1);

        assert!(matches!(service.add_idea(ann, "   ", None).await, Err(DomainError::ValidationFailed(_))));
        assert!(matches!(service.add_idea(99, "Book", None).await, Err(DomainError::PersonNotFound(99))));
    }
}
