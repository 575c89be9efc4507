use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::models::booking::Booking;
use crate::domain::ports::{BookingRepository, EventRepository};
use crate::error::AppError;

/// Gate for a booking write. Checks run strictly in order and the order is
/// user-visible: a sold-out event in the past reports "past", not "sold
/// out". Read-then-write with no atomicity across requests; two racing
/// attempts for the last seat can both pass the count check.
pub async fn admit_booking(
    events: &dyn EventRepository,
    bookings: &dyn BookingRepository,
    event_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<Booking, AppError> {
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    if event.date < now {
        return Err(AppError::InvalidState("Cannot book past events".into()));
    }

    let booked = bookings.count_by_event(event_id).await?;
    if booked >= event.capacity {
        return Err(AppError::CapacityExceeded);
    }

    if bookings.find_by_user_and_event(user_id, event_id).await?.is_some() {
        return Err(AppError::Conflict("You already booked this event".into()));
    }

    let booking = Booking::new(event.id, user_id.to_string());
    let created = bookings.create(&booking).await?;

    info!("Booking confirmed: {} for event {}", created.id, event_id);
    Ok(created)
}
