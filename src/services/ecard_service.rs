//! E-card delivery tracking.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::calendar::default_delivery_year;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{normalize_phone, ContactType, DeliveryStats, EcardDelivery, Person};
use crate::domain::ports::{Clock, EcardDeliveryRepository, PersonFilter, PersonRepository};

/// One delivery outcome as reported by the card vendor.
#[derive(Debug, Clone)]
pub struct DeliveryReport {
    pub person_id: i64,
    pub year: Option<i32>,
    pub contact: String,
    pub contact_type: Option<ContactType>,
    pub status: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    Created,
    Updated,
}

/// A person with their deliveries for one year.
#[derive(Debug, Clone, Serialize)]
pub struct PersonDeliveries {
    pub person: Person,
    pub deliveries: Vec<EcardDelivery>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceivedMessage {
    pub person_name: String,
    pub delivery: EcardDelivery,
}

#[derive(Clone)]
pub struct EcardService {
    deliveries: Arc<dyn EcardDeliveryRepository>,
    people: Arc<dyn PersonRepository>,
    clock: Arc<dyn Clock>,
}

impl EcardService {
    pub fn new(
        deliveries: Arc<dyn EcardDeliveryRepository>,
        people: Arc<dyn PersonRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { deliveries, people, clock }
    }

    /// The requested year, or the season most recently under way.
    pub fn resolve_year(&self, year: Option<i32>) -> i32 {
        year.unwrap_or_else(|| default_delivery_year(self.clock.today()))
    }

    /// Find the active person a vendor row refers to: by phone or email first, then by name.
    pub async fn match_person(&self, name: &str, contact: &str, contact_type: ContactType) -> DomainResult<Option<Person>> {
        let by_contact = match contact_type {
            ContactType::Sms => normalize_phone(contact).map(|phone| PersonFilter { phone: Some(phone), ..PersonFilter::active() }),
            ContactType::Email => {
                Some(PersonFilter { email: Some(contact.to_string()), ..PersonFilter::active() })
            }
        };

        if let Some(filter) = by_contact {
            if let Some(person) = self.people.list(filter).await?.into_iter().next() {
                return Ok(Some(person));
            }
        }

        let by_name = PersonFilter { name: Some(name.to_string()), ..PersonFilter::active() };
        Ok(self.people.list(by_name).await?.into_iter().next())
    }

    /// Insert or update the delivery for (person, year, contact).
    ///
    /// Re-imports refresh the status and import date; an existing reply is
    /// kept when the new report carries none.
    pub async fn record_delivery(&self, report: DeliveryReport) -> DomainResult<(EcardDelivery, RecordOutcome)> {
        self.people.get(report.person_id).await?.ok_or(DomainError::PersonNotFound(report.person_id))?;

        let status = report.status.trim().to_string();
        if status.is_empty() {
            return Err(DomainError::ValidationFailed("Delivery status cannot be empty".to_string()));
        }

        let contact_type = report.contact_type.unwrap_or_else(|| ContactType::detect(&report.contact));
        let contact = match contact_type {
            ContactType::Sms => normalize_phone(&report.contact),
            ContactType::Email => Some(report.contact.trim().to_string()).filter(|c| !c.is_empty()),
        }
        .ok_or_else(|| DomainError::ValidationFailed("Delivery contact cannot be empty".to_string()))?;

        let year = self.resolve_year(report.year);
        let message = report.message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
        let today = self.clock.today();

        if let Some(mut existing) = self.deliveries.find(report.person_id, year, &contact).await? {
            existing.status = status;
            existing.contact_type = contact_type;
            if message.is_some() {
                existing.message = message;
            }
            existing.imported_date = today;
            self.deliveries.update(&existing).await?;
            debug!(delivery_id = existing.id, year, "updated e-card delivery");
            return Ok((existing, RecordOutcome::Updated));
        }

        let mut delivery = EcardDelivery {
            id: 0,
            person_id: report.person_id,
            year,
            status,
            contact_used: contact,
            contact_type,
            message,
            imported_date: today,
        };
        delivery.id = self.deliveries.create(&delivery).await?;
        debug!(delivery_id = delivery.id, year, "recorded e-card delivery");
        Ok((delivery, RecordOutcome::Created))
    }

    /// Deliveries for a year grouped by person, ordered by name.
    pub async fn deliveries_by_person(&self, year: i32) -> DomainResult<Vec<PersonDeliveries>> {
        let deliveries = self.deliveries.list_for_year(year).await?;
        self.group_by_person(deliveries).await
    }

    /// People whose card bounced in a year, with the contacts that failed.
    pub async fn contact_issues(&self, year: i32) -> DomainResult<Vec<PersonDeliveries>> {
        let bounced = self.deliveries.bounced_for_year(year).await?;
        self.group_by_person(bounced).await
    }

    pub async fn messages(&self, year: i32) -> DomainResult<Vec<ReceivedMessage>> {
        let mut messages = Vec::new();
        for delivery in self.deliveries.with_messages_for_year(year).await? {
            let person_name = self
                .people
                .get(delivery.person_id)
                .await?
                .map_or_else(|| format!("#{}", delivery.person_id), |p| p.name);
            messages.push(ReceivedMessage { person_name, delivery });
        }
        Ok(messages)
    }

    pub async fn available_years(&self) -> DomainResult<Vec<i32>> {
        self.deliveries.available_years().await
    }

    pub async fn stats(&self, year: i32) -> DomainResult<DeliveryStats> {
        self.deliveries.stats_for_year(year).await
    }

    async fn group_by_person(&self, deliveries: Vec<EcardDelivery>) -> DomainResult<Vec<PersonDeliveries>> {
        let mut grouped: BTreeMap<i64, Vec<EcardDelivery>> = BTreeMap::new();
        for delivery in deliveries {
            grouped.entry(delivery.person_id).or_default().push(delivery);
        }

        let mut result = Vec::with_capacity(grouped.len());
        for (person_id, deliveries) in grouped {
            let person = self.people.get(person_id).await?.ok_or(DomainError::PersonNotFound(person_id))?;
            result.push(PersonDeliveries { person, deliveries });
        }
        result.sort_by(|a, b| a.person.name.to_lowercase().cmp(&b.person.name.to_lowercase()));
        Ok(result)
    }
}
