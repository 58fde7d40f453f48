//! Person service: the household's card and gift list.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{normalize_phone, CardPreference, Person, PersonType};
use crate::domain::ports::{PersonFilter, PersonRepository};

/// Field changes for an edit. `None` leaves a field untouched; for the
/// optional text fields an empty string clears the value.
#[derive(Debug, Clone, Default)]
pub struct PersonChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub person_type: Option<PersonType>,
    pub card_preference: Option<CardPreference>,
    pub gets_gift: Option<bool>,
    pub budget: Option<f64>,
    pub card_addressee: Option<String>,
    pub notes: Option<String>,
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl PersonChanges {
    fn apply(self, person: &mut Person) {
        if let Some(name) = self.name {
            person.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            person.email = blank_to_none(email);
        }
        if let Some(phone) = self.phone {
            person.phone = normalize_phone(&phone);
        }
        if let Some(person_type) = self.person_type {
            person.person_type = person_type;
        }
        if let Some(preference) = self.card_preference {
            person.card_preference = preference;
        }
        if let Some(gets_gift) = self.gets_gift {
            person.gets_gift = gets_gift;
        }
        if let Some(budget) = self.budget {
            person.budget = Some(budget);
        }
        if let Some(addressee) = self.card_addressee {
            person.card_addressee = blank_to_none(addressee);
        }
        if let Some(notes) = self.notes {
            person.notes = blank_to_none(notes);
        }
    }
}

pub struct PersonService<R: PersonRepository> {
    repository: Arc<R>,
}

impl<R: PersonRepository> PersonService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Add a person unless an active person already has the same name, email or phone.
    pub async fn add_person(&self, mut person: Person) -> DomainResult<Person> {
        person.name = person.name.trim().to_string();
        person.email = person.email.and_then(blank_to_none);
        person.phone = person.phone.as_deref().and_then(normalize_phone);
        person.validate().map_err(DomainError::ValidationFailed)?;

        let duplicates = self.find_duplicates(&person).await?;
        if !duplicates.is_empty() {
            return Err(DomainError::DuplicatePerson(duplicates));
        }

        person.id = self.repository.create(&person).await?;
        info!(person_id = person.id, name = %person.name, "added person");
        Ok(person)
    }

    async fn find_duplicates(&self, person: &Person) -> DomainResult<Vec<String>> {
        let mut duplicates = Vec::new();

        let by_name = PersonFilter { name: Some(person.name.clone()), ..PersonFilter::active() };
        if self.repository.count(by_name).await? > 0 {
            duplicates.push(format!("name \"{}\"", person.name));
        }

        if let Some(email) = &person.email {
            let by_email = PersonFilter { email: Some(email.clone()), ..PersonFilter::active() };
            if self.repository.count(by_email).await? > 0 {
                duplicates.push(format!("email \"{email}\""));
            }
        }

        if let Some(phone) = &person.phone {
            let by_phone = PersonFilter { phone: Some(phone.clone()), ..PersonFilter::active() };
            if self.repository.count(by_phone).await? > 0 {
                duplicates.push(format!("phone \"{phone}\""));
            }
        }

        Ok(duplicates)
    }

    pub async fn get_person(&self, id: i64) -> DomainResult<Person> {
        self.repository.get(id).await?.ok_or(DomainError::PersonNotFound(id))
    }

    pub async fn edit_person(&self, id: i64, changes: PersonChanges) -> DomainResult<Person> {
        let mut person = self.get_person(id).await?;
        changes.apply(&mut person);
        person.validate().map_err(DomainError::ValidationFailed)?;
        person.updated_at = Utc::now();

        self.repository.update(&person).await?;
        Ok(person)
    }

    /// List people, active only unless the filter says otherwise.
    pub async fn list_people(&self, filter: PersonFilter) -> DomainResult<Vec<Person>> {
        let filter = PersonFilter {
            active: filter.active.or(Some(true)),
            ..filter
        };
        self.repository.list(filter).await
    }

    /// Soft delete: history and archived statistics keep referring to the person.
    pub async fn remove_person(&self, id: i64) -> DomainResult<Person> {
        let mut person = self.get_person(id).await?;
        person.active = false;
        person.updated_at = Utc::now();
        self.repository.update(&person).await?;

        info!(person_id = id, "removed person");
        Ok(person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqlitePersonRepository};

    async fn setup_service() -> PersonService<SqlitePersonRepository> {
        let pool = create_migrated_test_pool().await.unwrap();
        PersonService::new(Arc::new(SqlitePersonRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_add_normalizes_phone() {
        let service = setup_service().await;
        let person = service
            .add_person(Person::new("  Ann ").with_phone("(555) 123-4567").with_email(" "))
            .await
            .unwrap();

        assert!(person.id > 0);
        assert_eq!(person.name, "Ann");
        assert_eq!(person.phone.as_deref(), Some("5551234567"));
        assert_eq!(person.email, None);
    }

    #[tokio::test]
    async fn test_duplicates_are_reported() {
        let service = setup_service().await;
        service
            .add_person(Person::new("Ann").with_email("ann@example.com").with_phone("555-123-4567"))
            .await
            .unwrap();

        let err = service
            .add_person(Person::new("ann").with_email("ANN@example.com").with_phone("5551234567"))
            .await
            .unwrap_err();
        match err {
            DomainError::DuplicatePerson(fields) => assert_eq!(fields.len(), 3),
            other => panic!("expected DuplicatePerson, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_removed_person_is_not_a_duplicate() {
        let service = setup_service().await;
        let ann = service.add_person(Person::new("Ann")).await.unwrap();
        service.remove_person(ann.id).await.unwrap();

        assert!(service.add_person(Person::new("Ann")).await.is_ok());
        assert_eq!(service.list_people(PersonFilter::default()).await.unwrap().len(), 1);
        assert_eq!(
            service
                .list_people(PersonFilter { active: Some(false), ..Default::default() })
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_edit_person() {
        let service = setup_service().await;
        let ann = service.add_person(Person::new("Ann").with_email("ann@example.com")).await.unwrap();

        let edited = service
            .edit_person(
                ann.id,
                PersonChanges {
                    email: Some(String::new()),
                    card_preference: Some(CardPreference::Handwritten),
                    gets_gift: Some(true),
                    budget: Some(25.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.email, None);
        assert_eq!(edited.card_preference, CardPreference::Handwritten);
        assert_eq!(service.get_person(ann.id).await.unwrap().budget, Some(25.0));
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let service = setup_service().await;
        assert!(matches!(
            service.add_person(Person::new(" ")).await,
            Err(DomainError::ValidationFailed(_))
        ));
        assert!(matches!(service.get_person(404).await, Err(DomainError::PersonNotFound(404))));
    }
}
