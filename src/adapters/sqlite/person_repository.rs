//! SQLite implementation of the PersonRepository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::parse_datetime;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CardPreference, Person, PersonType};
use crate::domain::ports::{PersonFilter, PersonRepository};

const PERSON_COLUMNS: &str = "id, name, email, phone, person_type, card_preference, gets_gift, budget, \
     card_addressee, notes, active, created_at, updated_at";

#[derive(Clone)]
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Append `AND ...` clauses for every set filter field.
/// Name, email and phone match case-insensitively after trimming.
fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PersonFilter) {
    if let Some(active) = filter.active {
        qb.push(" AND active = ").push_bind(active);
    }
    if let Some(person_type) = filter.person_type {
        qb.push(" AND person_type = ").push_bind(person_type.as_str());
    }
    if let Some(preference) = filter.card_preference {
        qb.push(" AND card_preference = ").push_bind(preference.as_str());
    }
    if let Some(gets_gift) = filter.gets_gift {
        qb.push(" AND gets_gift = ").push_bind(gets_gift);
    }
    if let Some(name) = &filter.name {
        qb.push(" AND lower(trim(name)) = ").push_bind(name.trim().to_lowercase());
    }
    if let Some(email) = &filter.email {
        qb.push(" AND lower(trim(email)) = ").push_bind(email.trim().to_lowercase());
    }
    if let Some(phone) = &filter.phone {
        qb.push(" AND trim(phone) = ").push_bind(phone.trim().to_string());
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn create(&self, person: &Person) -> DomainResult<i64> {
        let result = sqlx::query(
            r#"INSERT INTO people (name, email, phone, person_type, card_preference, gets_gift, budget,
                                   card_addressee, notes, active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&person.name)
        .bind(&person.email)
        .bind(&person.phone)
        .bind(person.person_type.as_str())
        .bind(person.card_preference.as_str())
        .bind(person.gets_gift)
        .bind(person.budget)
        .bind(&person.card_addressee)
        .bind(&person.notes)
        .bind(person.active)
        .bind(person.created_at.to_rfc3339())
        .bind(person.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Person>> {
        let row: Option<PersonRow> = sqlx::query_as(&format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn update(&self, person: &Person) -> DomainResult<()> {
        let result = sqlx::query(
            r#"UPDATE people SET name = ?, email = ?, phone = ?, person_type = ?, card_preference = ?,
               gets_gift = ?, budget = ?, card_addressee = ?, notes = ?, active = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&person.name)
        .bind(&person.email)
        .bind(&person.phone)
        .bind(person.person_type.as_str())
        .bind(person.card_preference.as_str())
        .bind(person.gets_gift)
        .bind(person.budget)
        .bind(&person.card_addressee)
        .bind(&person.notes)
        .bind(person.active)
        .bind(person.updated_at.to_rfc3339())
        .bind(person.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PersonNotFound(person.id));
        }

        Ok(())
    }

    async fn list(&self, filter: PersonFilter) -> DomainResult<Vec<Person>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {PERSON_COLUMNS} FROM people WHERE 1=1"));
        push_filter(&mut qb, &filter);
        qb.push(" ORDER BY name COLLATE NOCASE, id");

        let rows: Vec<PersonRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn count(&self, filter: PersonFilter) -> DomainResult<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM people WHERE 1=1");
        push_filter(&mut qb, &filter);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn total_gift_budget(&self) -> DomainResult<f64> {
        let total: Option<f64> =
            sqlx::query_scalar("SELECT SUM(budget) FROM people WHERE active = 1 AND gets_gift = 1")
                .fetch_one(&self.pool)
                .await?;
        Ok(total.unwrap_or(0.0))
    }
}

#[derive(sqlx::FromRow)]
struct PersonRow {
    id: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    person_type: String,
    card_preference: String,
    gets_gift: bool,
    budget: Option<f64>,
    card_addressee: Option<String>,
    notes: Option<String>,
    active: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PersonRow> for Person {
    type Error = DomainError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let person_type = PersonType::from_str(&row.person_type)
            .ok_or_else(|| DomainError::SerializationError(format!("Invalid person type: {}", row.person_type)))?;

        let card_preference = CardPreference::from_str(&row.card_preference).ok_or_else(|| {
            DomainError::SerializationError(format!("Invalid card preference: {}", row.card_preference))
        })?;

        Ok(Person {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            person_type,
            card_preference,
            gets_gift: row.gets_gift,
            budget: row.budget,
            card_addressee: row.card_addressee,
            notes: row.notes,
            active: row.active,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_repo() -> SqlitePersonRepository {
        let pool = create_migrated_test_pool().await.unwrap();
        SqlitePersonRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_get_person() {
        let repo = setup_test_repo().await;
        let person = Person::new("Ann Smith")
            .with_email("ann@example.com")
            .with_type(PersonType::Family)
            .with_card_preference(CardPreference::Handwritten)
            .with_gift(Some(50.0));

        let id = repo.create(&person).await.unwrap();
        let retrieved = repo.get(id).await.unwrap().unwrap();

        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.name, "Ann Smith");
        assert_eq!(retrieved.person_type, PersonType::Family);
        assert_eq!(retrieved.card_preference, CardPreference::Handwritten);
        assert!(retrieved.gets_gift);
        assert_eq!(retrieved.budget, Some(50.0));
        assert!(retrieved.active);
    }

    #[tokio::test]
    async fn test_update_missing_person() {
        let repo = setup_test_repo().await;
        let mut person = Person::new("Ghost");
        person.id = 99;
        assert!(matches!(repo.update(&person).await, Err(DomainError::PersonNotFound(99))));
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let repo = setup_test_repo().await;
        repo.create(&Person::new("bob").with_card_preference(CardPreference::Handwritten))
            .await
            .unwrap();
        repo.create(&Person::new("Alice").with_gift(None)).await.unwrap();
        let mut gone = Person::new("Carol");
        gone.active = false;
        repo.create(&gone).await.unwrap();

        let active = repo.list(PersonFilter::active()).await.unwrap();
        let names: Vec<_> = active.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob"]);

        let handwritten = repo
            .list(PersonFilter {
                card_preference: Some(CardPreference::Handwritten),
                ..PersonFilter::active()
            })
            .await
            .unwrap();
        assert_eq!(handwritten.len(), 1);
        assert_eq!(handwritten[0].name, "bob");

        assert_eq!(repo.count(PersonFilter::default()).await.unwrap(), 3);
        assert_eq!(
            repo.count(PersonFilter { gets_gift: Some(true), ..PersonFilter::active() })
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_name_match_is_case_insensitive() {
        let repo = setup_test_repo().await;
        repo.create(&Person::new("Ann Smith")).await.unwrap();

        let found = repo
            .list(PersonFilter { name: Some("  ann smith ".to_string()), ..PersonFilter::active() })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_total_gift_budget_counts_active_recipients_only() {
        let repo = setup_test_repo().await;
        assert_eq!(repo.total_gift_budget().await.unwrap(), 0.0);

        repo.create(&Person::new("A").with_gift(Some(40.0))).await.unwrap();
        repo.create(&Person::new("B").with_gift(Some(10.5))).await.unwrap();
        let mut inactive = Person::new("C").with_gift(Some(100.0));
        inactive.active = false;
        repo.create(&inactive).await.unwrap();

        assert_eq!(repo.total_gift_budget().await.unwrap(), 50.5);
    }
}
