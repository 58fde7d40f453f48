//! SQLite implementation of the SummaryRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::parse_date;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AnnualSummary;
use crate::domain::ports::SummaryRepository;

const SUMMARY_COLUMNS: &str =
    "id, year, total_people, gifts_given, handwritten_cards, ecards_sent, total_budget, completed_date, notes";

#[derive(Clone)]
pub struct SqliteSummaryRepository {
    pool: SqlitePool,
}

impl SqliteSummaryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepository for SqliteSummaryRepository {
    async fn exists(&self, year: i32) -> DomainResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM annual_summaries WHERE year = ?")
            .bind(year)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    async fn get(&self, year: i32) -> DomainResult<Option<AnnualSummary>> {
        let row: Option<SummaryRow> =
            sqlx::query_as(&format!("SELECT {SUMMARY_COLUMNS} FROM annual_summaries WHERE year = ?"))
                .bind(year)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<AnnualSummary>> {
        let rows: Vec<SummaryRow> =
            sqlx::query_as(&format!("SELECT {SUMMARY_COLUMNS} FROM annual_summaries ORDER BY year DESC"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    year: i32,
    total_people: i64,
    gifts_given: i64,
    handwritten_cards: i64,
    ecards_sent: i64,
    total_budget: Option<f64>,
    completed_date: String,
    notes: Option<String>,
}

impl TryFrom<SummaryRow> for AnnualSummary {
    type Error = DomainError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(AnnualSummary {
            id: row.id,
            year: row.year,
            total_people: row.total_people,
            gifts_given: row.gifts_given,
            handwritten_cards: row.handwritten_cards,
            ecards_sent: row.ecards_sent,
            total_budget: row.total_budget,
            completed_date: parse_date(&row.completed_date)?,
            notes: row.notes,
        })
    }
}
