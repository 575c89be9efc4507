use crate::domain::{
    models::{booking::Booking, event::Event},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const JOINED_COLUMNS: &str =
    "b.id, b.event_id, b.user_id, b.status, b.created_at, \
     e.id AS e_id, e.name AS e_name, e.description AS e_description, e.category AS e_category, \
     e.date AS e_date, e.venue AS e_venue, e.price AS e_price, e.image AS e_image, \
     e.capacity AS e_capacity, e.created_at AS e_created_at";

/// LEFT JOIN row -> (booking, maybe its event). The event side is NULL
/// when the referenced event row no longer exists.
fn map_joined_row(row: &SqliteRow) -> (Booking, Option<Event>) {
    let booking = Booking {
        id: row.get("id"),
        event_id: row.get("event_id"),
        user_id: row.get("user_id"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    };

    let event = row.get::<Option<String>, _>("e_id").map(|id| Event {
        id,
        name: row.get("e_name"),
        description: row.get("e_description"),
        category: row.get("e_category"),
        date: row.get("e_date"),
        venue: row.get("e_venue"),
        price: row.get("e_price"),
        image: row.get("e_image"),
        capacity: row.get("e_capacity"),
        created_at: row.get("e_created_at"),
    });

    (booking, event)
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, event_id, user_id, status, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.event_id).bind(&booking.user_id)
            .bind(&booking.status).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_with_event(&self, id: &str, user_id: &str) -> Result<Option<(Booking, Option<Event>)>, AppError> {
        let sql = format!(
            "SELECT {} FROM bookings b LEFT JOIN events e ON e.id = b.event_id \
             WHERE b.id = ? AND b.user_id = ?",
            JOINED_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id).bind(user_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?;

        Ok(row.map(|r| map_joined_row(&r)))
    }

    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? AND event_id = ?")
            .bind(user_id).bind(event_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_page_with_events(&self, user_id: &str, limit: i64, offset: i64) -> Result<Vec<(Booking, Option<Event>)>, AppError> {
        let sql = format!(
            "SELECT {} FROM bookings b LEFT JOIN events e ON e.id = b.event_id \
             WHERE b.user_id = ? ORDER BY b.created_at DESC LIMIT ? OFFSET ?",
            JOINED_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(user_id).bind(limit).bind(offset)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok(rows.iter().map(map_joined_row).collect())
    }

    async fn list_event_ids_for_user(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT event_id FROM bookings WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ? AND user_id = ?")
            .bind(id).bind(user_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found or unauthorized".into()));
        }
        Ok(())
    }
}
