//! E-card delivery repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{DeliveryStats, EcardDelivery};

#[async_trait]
pub trait EcardDeliveryRepository: Send + Sync {
    async fn find(&self, person_id: i64, year: i32, contact_used: &str) -> DomainResult<Option<EcardDelivery>>;

    async fn create(&self, delivery: &EcardDelivery) -> DomainResult<i64>;

    async fn update(&self, delivery: &EcardDelivery) -> DomainResult<()>;

    async fn list_for_year(&self, year: i32) -> DomainResult<Vec<EcardDelivery>>;

    async fn bounced_for_year(&self, year: i32) -> DomainResult<Vec<EcardDelivery>>;

    /// Deliveries carrying a non-empty reply, most recently imported first.
    async fn with_messages_for_year(&self, year: i32) -> DomainResult<Vec<EcardDelivery>>;

    /// Years with at least one delivery, newest first.
    async fn available_years(&self) -> DomainResult<Vec<i32>>;

    async fn stats_for_year(&self, year: i32) -> DomainResult<DeliveryStats>;
}
