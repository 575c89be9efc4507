use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::PageQuery;
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::admission::admit_booking;
use crate::domain::services::enrichment::flatten_user_bookings;
use crate::domain::services::pagination::{Page, PageParams};
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = admit_booking(
        state.event_repo.as_ref(),
        state.booking_repo.as_ref(),
        &event_id,
        &ctx.user_id,
        Utc::now(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": booking,
            "message": "Event booked successfully!"
        })),
    ))
}

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::from_raw(query.page.as_deref(), query.limit.as_deref());

    let total = state.booking_repo.count_by_user(&ctx.user_id).await?;
    let rows = state
        .booking_repo
        .list_page_with_events(&ctx.user_id, params.limit, params.offset())
        .await?;

    // Bookings whose event was deleted are dropped here, not surfaced
    // as errors.
    let bookings = flatten_user_bookings(rows);

    Ok(Json(Page::new(bookings, total, &params)))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.booking_repo.find_with_event(&booking_id, &ctx.user_id).await?
        .ok_or(AppError::NotFound("Booking not found or unauthorized".into()))?;

    let flattened = flatten_user_bookings(vec![row])
        .pop()
        .ok_or(AppError::NotFound("Booking not found or unauthorized".into()))?;

    Ok(Json(serde_json::json!({ "success": true, "data": flattened })))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.delete(&booking_id, &ctx.user_id).await?;

    info!("Booking cancelled: {}", booking_id);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking deleted successfully"
    })))
}
