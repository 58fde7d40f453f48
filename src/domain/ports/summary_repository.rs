//! Archive store port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AnnualSummary;

/// Read access to archived years. Summaries are only ever written by the
/// rollover transaction.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    async fn exists(&self, year: i32) -> DomainResult<bool>;

    async fn get(&self, year: i32) -> DomainResult<Option<AnnualSummary>>;

    /// All summaries, newest year first.
    async fn list(&self) -> DomainResult<Vec<AnnualSummary>>;
}
