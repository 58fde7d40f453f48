//! SQLite implementation of the EcardDeliveryRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{format_date, parse_date};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ContactType, DeliveryStats, EcardDelivery, BOUNCED_STATUS};
use crate::domain::ports::EcardDeliveryRepository;

const DELIVERY_COLUMNS: &str = "id, person_id, year, status, contact_used, contact_type, message, imported_date";

#[derive(Clone)]
pub struct SqliteEcardDeliveryRepository {
    pool: SqlitePool,
}

impl SqliteEcardDeliveryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Deliveries for `year` narrowed by `condition`; `with_status` binds the
    /// bounced status to the condition's single placeholder.
    async fn select(&self, year: i32, condition: &str, with_status: bool) -> DomainResult<Vec<EcardDelivery>> {
        let query = format!("SELECT {DELIVERY_COLUMNS} FROM ecard_deliveries WHERE year = ? {condition}");
        let mut q = sqlx::query_as::<_, DeliveryRow>(&query).bind(year);
        if with_status {
            q = q.bind(BOUNCED_STATUS);
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }
}

#[async_trait]
impl EcardDeliveryRepository for SqliteEcardDeliveryRepository {
    async fn find(&self, person_id: i64, year: i32, contact_used: &str) -> DomainResult<Option<EcardDelivery>> {
        let row: Option<DeliveryRow> = sqlx::query_as(&format!(
            "SELECT {DELIVERY_COLUMNS} FROM ecard_deliveries WHERE person_id = ? AND year = ? AND contact_used = ?"
        ))
        .bind(person_id)
        .bind(year)
        .bind(contact_used)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn create(&self, delivery: &EcardDelivery) -> DomainResult<i64> {
        let result = sqlx::query(
            r#"INSERT INTO ecard_deliveries (person_id, year, status, contact_used, contact_type, message, imported_date)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(delivery.person_id)
        .bind(delivery.year)
        .bind(&delivery.status)
        .bind(&delivery.contact_used)
        .bind(delivery.contact_type.as_str())
        .bind(&delivery.message)
        .bind(format_date(delivery.imported_date))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, delivery: &EcardDelivery) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE ecard_deliveries SET status = ?, contact_type = ?, message = ?, imported_date = ?
               WHERE id = ?"#,
        )
        .bind(&delivery.status)
        .bind(delivery.contact_type.as_str())
        .bind(&delivery.message)
        .bind(format_date(delivery.imported_date))
        .bind(delivery.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ValidationFailed(format!(
                "E-card delivery {} does not exist",
                delivery.id
            )));
        }

        Ok(())
    }

    async fn list_for_year(&self, year: i32) -> DomainResult<Vec<EcardDelivery>> {
        self.select(year, "ORDER BY person_id, id", false).await
    }

    async fn bounced_for_year(&self, year: i32) -> DomainResult<Vec<EcardDelivery>> {
        self.select(year, "AND status = ? COLLATE NOCASE ORDER BY person_id, id", true).await
    }

    async fn with_messages_for_year(&self, year: i32) -> DomainResult<Vec<EcardDelivery>> {
        self.select(
            year,
            "AND message IS NOT NULL AND trim(message) != '' ORDER BY imported_date DESC, id DESC",
            false,
        )
        .await
    }

    async fn available_years(&self) -> DomainResult<Vec<i32>> {
        let years: Vec<i32> = sqlx::query_scalar("SELECT DISTINCT year FROM ecard_deliveries ORDER BY year DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(years)
    }

    async fn stats_for_year(&self, year: i32) -> DomainResult<DeliveryStats> {
        let (total_deliveries, messages_received, bounced): (i64, i64, i64) = sqlx::query_as(
            r#"SELECT COUNT(*),
                      COALESCE(SUM(CASE WHEN message IS NOT NULL AND trim(message) != '' THEN 1 ELSE 0 END), 0),
                      COALESCE(SUM(CASE WHEN status = ? COLLATE NOCASE THEN 1 ELSE 0 END), 0)
               FROM ecard_deliveries WHERE year = ?"#,
        )
        .bind(BOUNCED_STATUS)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        Ok(DeliveryStats {
            total_deliveries,
            messages_received,
            bounced,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DeliveryRow {
    id: i64,
    person_id: i64,
    year: i32,
    status: String,
    contact_used: String,
    contact_type: String,
    message: Option<String>,
    imported_date: String,
}

impl TryFrom<DeliveryRow> for EcardDelivery {
    type Error = DomainError;

    fn try_from(row: DeliveryRow) -> Result<Self, Self::Error> {
        let contact_type = ContactType::from_str(&row.contact_type)
            .ok_or_else(|| DomainError::SerializationError(format!("Invalid contact type: {}", row.contact_type)))?;

        Ok(EcardDelivery {
            id: row.id,
            person_id: row.person_id,
            year: row.year,
            status: row.status,
            contact_used: row.contact_used,
            contact_type,
            message: row.message,
            imported_date: parse_date(&row.imported_date)?,
        })
    }
}
