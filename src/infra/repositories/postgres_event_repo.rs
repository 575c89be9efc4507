use crate::domain::{models::event::{Event, EventFilter}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a EventFilter) {
        if let Some(after) = filter.starting_after {
            qb.push(" AND date >= ").push_bind(after);
        }
        if let Some(category) = &filter.category {
            qb.push(" AND category = ").push_bind(category);
        }
        if let Some(search) = &filter.search {
            qb.push(" AND name ILIKE ").push_bind(format!("%{}%", search));
        }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, description, category, date, venue, price, image, capacity, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.name).bind(&event.description).bind(&event.category)
            .bind(event.date).bind(&event.venue).bind(event.price).bind(&event.image)
            .bind(event.capacity).bind(event.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_duplicate(&self, name: &str, date: DateTime<Utc>, venue: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE name = $1 AND date = $2 AND venue = $3")
            .bind(name).bind(date).bind(venue)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_page(&self, filter: &EventFilter, limit: i64, offset: i64) -> Result<Vec<Event>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM events WHERE 1=1");
        Self::push_filter(&mut qb, filter);
        qb.push(" ORDER BY date ASC LIMIT ").push_bind(limit).push(" OFFSET ").push_bind(offset);

        qb.build_query_as::<Event>()
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count(&self, filter: &EventFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM events WHERE 1=1");
        Self::push_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET name = $1, description = $2, category = $3, date = $4, venue = $5, price = $6, image = $7, capacity = $8
             WHERE id = $9
             RETURNING *"
        )
            .bind(&event.name).bind(&event.description).bind(&event.category).bind(event.date)
            .bind(&event.venue).bind(event.price).bind(&event.image).bind(event.capacity)
            .bind(&event.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
