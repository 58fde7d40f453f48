//! Gift idea repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::GiftIdea;

#[async_trait]
pub trait GiftIdeaRepository: Send + Sync {
    async fn create(&self, idea: &GiftIdea) -> DomainResult<i64>;

    async fn get(&self, id: i64) -> DomainResult<Option<GiftIdea>>;

    /// Ideas for a person, most recently added first (ties: newest id first).
    async fn list_for_person(&self, person_id: i64, unused_only: bool) -> DomainResult<Vec<GiftIdea>>;
}
