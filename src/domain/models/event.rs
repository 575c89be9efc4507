use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const CATEGORIES: [&str; 5] = ["concert", "conference", "workshop", "exhibition", "sports"];

pub const DEFAULT_CAPACITY: i64 = 100;

pub const DEFAULT_IMAGE: &str =
    "https://res.cloudinary.com/dgbtuclc2/image/upload/w_300,h_200,c_fill,g_auto,f_auto,q_auto/v1747320741/event/Blog-banner-5-C-of-event-management_dx7qsb.png";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub price: f64,
    pub image: String,
    pub capacity: i64,
    pub created_at: DateTime<Utc>,
}

/// Filter for event listings. Borrowed by the repositories; never mutated.
#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub starting_after: Option<DateTime<Utc>>,
}

/// One event as returned by the listing endpoints, carrying the
/// per-requester booking flag derived from the bookings collection.
#[derive(Debug, Serialize)]
pub struct EventListing {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "userHasBooked")]
    pub user_has_booked: bool,
}
