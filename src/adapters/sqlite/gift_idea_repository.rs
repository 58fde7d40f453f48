//! SQLite implementation of the GiftIdeaRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{format_date, parse_date};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GiftIdea;
use crate::domain::ports::GiftIdeaRepository;

#[derive(Clone)]
pub struct SqliteGiftIdeaRepository {
    pool: SqlitePool,
}

impl SqliteGiftIdeaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GiftIdeaRepository for SqliteGiftIdeaRepository {
    async fn create(&self, idea: &GiftIdea) -> DomainResult<i64> {
        let result = sqlx::query(
            "INSERT INTO gift_ideas (person_id, idea, notes, added_date, used_year) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(idea.person_id)
        .bind(&idea.idea)
        .bind(&idea.notes)
        .bind(format_date(idea.added_date))
        .bind(idea.used_year)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DomainResult<Option<GiftIdea>> {
        let row: Option<GiftIdeaRow> = sqlx::query_as(
            "SELECT id, person_id, idea, notes, added_date, used_year FROM gift_ideas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn list_for_person(&self, person_id: i64, unused_only: bool) -> DomainResult<Vec<GiftIdea>> {
        let mut query = String::from(
            "SELECT id, person_id, idea, notes, added_date, used_year FROM gift_ideas WHERE person_id = ?",
        );
        if unused_only {
            query.push_str(" AND used_year IS NULL");
        }
        query.push_str(" ORDER BY added_date DESC, id DESC");

        let rows: Vec<GiftIdeaRow> = sqlx::query_as(&query).bind(person_id).fetch_all(&self.pool).await?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }
}

#[derive(sqlx::FromRow)]
struct GiftIdeaRow {
    id: i64,
    person_id: i64,
    idea: String,
    notes: Option<String>,
    added_date: String,
    used_year: Option<i32>,
}

impl TryFrom<GiftIdeaRow> for GiftIdea {
    type Error = DomainError;

    fn try_from(row: GiftIdeaRow) -> Result<Self, Self::Error> {
        Ok(GiftIdea {
            id: row.id,
            person_id: row.person_id,
            idea: row.idea,
            notes: row.notes,
            added_date: parse_date(&row.added_date)?,
            used_year: row.used_year,
        })
    }
}
