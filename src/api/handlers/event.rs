use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateEventRequest, ListEventsQuery, UpdateEventRequest};
use crate::api::extractors::{admin::AdminUser, auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::domain::models::event::{Event, EventFilter, EventListing, DEFAULT_CAPACITY, DEFAULT_IMAGE};
use crate::domain::services::enrichment::mark_user_bookings;
use crate::domain::services::pagination::{Page, PageParams};
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use garde::Validate;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user): MaybeAuthUser,
    Query(query): Query<ListEventsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::from_raw(query.page.as_deref(), query.limit.as_deref());

    let filter = EventFilter {
        category: query.category,
        search: query.search,
        starting_after: Some(Utc::now()),
    };

    let total = state.event_repo.count(&filter).await?;
    let events = state.event_repo.list_page(&filter, params.limit, params.offset()).await?;

    // One bookings query for the whole page; guests skip it entirely.
    let booked_ids: HashSet<String> = match &user {
        Some(ctx) => state
            .booking_repo
            .list_event_ids_for_user(&ctx.user_id)
            .await?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    let listings = mark_user_bookings(events, &booked_ids);

    Ok(Json(Page::new(listings, total, &params)))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let user_has_booked = state
        .booking_repo
        .find_by_user_and_event(&ctx.user_id, &event.id)
        .await?
        .is_some();

    Ok(Json(serde_json::json!({
        "data": EventListing { event, user_has_booked }
    })))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|r| AppError::from_report(&r))?;

    if payload.date < Utc::now() {
        return Err(AppError::InvalidState("Event date cannot be in the past".into()));
    }

    if state.event_repo.find_duplicate(&payload.name, payload.date, &payload.venue).await?.is_some() {
        return Err(AppError::Conflict("Event already exists".into()));
    }

    let event = Event {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        description: payload.description,
        category: payload.category,
        date: payload.date,
        venue: payload.venue,
        price: payload.price,
        image: payload.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        capacity: payload.capacity.unwrap_or(DEFAULT_CAPACITY),
        created_at: Utc::now(),
    };

    let created = state.event_repo.create(&event).await?;

    info!("Event created: {} ({})", created.name, created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|r| AppError::from_report(&r))?;

    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(date) = payload.date {
        if date < Utc::now() {
            return Err(AppError::InvalidState("Event date cannot be in the past".into()));
        }
        event.date = date;
    }
    if let Some(name) = payload.name { event.name = name; }
    if let Some(description) = payload.description { event.description = description; }
    if let Some(category) = payload.category { event.category = category; }
    if let Some(venue) = payload.venue { event.venue = venue; }
    if let Some(price) = payload.price { event.price = price; }
    if let Some(image) = payload.image { event.image = image; }
    if let Some(capacity) = payload.capacity { event.capacity = capacity; }

    if let Some(duplicate) = state.event_repo.find_duplicate(&event.name, event.date, &event.venue).await? {
        if duplicate.id != event.id {
            return Err(AppError::Conflict("Event already exists".into()));
        }
    }

    let updated = state.event_repo.update(&event).await?;

    info!("Event updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Bookings referencing this event are left in place; the listing
    // layer filters them out.
    state.event_repo.delete(&event_id).await?;

    info!("Event deleted: {}", event_id);

    Ok(Json(serde_json::json!({"message": "Event deleted successfully"})))
}
