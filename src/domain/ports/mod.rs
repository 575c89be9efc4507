use crate::domain::models::{
    booking::Booking,
    event::{Event, EventFilter},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    /// Duplicate guard for event creation: same name on the same date at
    /// the same venue.
    async fn find_duplicate(&self, name: &str, date: chrono::DateTime<chrono::Utc>, venue: &str) -> Result<Option<Event>, AppError>;
    async fn list_page(&self, filter: &EventFilter, limit: i64, offset: i64) -> Result<Vec<Event>, AppError>;
    async fn count(&self, filter: &EventFilter) -> Result<i64, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Owner-scoped lookup joined to the referenced event. The event side
    /// is None when it has been deleted out from under the booking.
    async fn find_with_event(&self, id: &str, user_id: &str) -> Result<Option<(Booking, Option<Event>)>, AppError>;
    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_page_with_events(&self, user_id: &str, limit: i64, offset: i64) -> Result<Vec<(Booking, Option<Event>)>, AppError>;
    async fn list_event_ids_for_user(&self, user_id: &str) -> Result<Vec<String>, AppError>;
    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    async fn delete(&self, id: &str, user_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> Result<String, AppError>;
    async fn delete(&self, uri: &str) -> Result<(), AppError>;
}
