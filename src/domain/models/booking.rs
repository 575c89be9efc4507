use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const STATUS_CONFIRMED: &str = "CONFIRMED";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(event_id: String, user_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            user_id,
            status: STATUS_CONFIRMED.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A booking flattened together with the display fields of the event it
/// references, as served by the "my bookings" endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBooking {
    pub id: String,
    pub status: String,
    pub booked_at: DateTime<Utc>,
    pub event_id: String,
    pub event_name: String,
    pub event_description: String,
    pub event_date: DateTime<Utc>,
    pub event_venue: String,
    pub event_price: f64,
    pub event_image: String,
    pub event_category: String,
}
