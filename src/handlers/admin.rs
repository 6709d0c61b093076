use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::{menu_item, user};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::utils::notify::send_booking_notification;
use crate::utils::ownership::{booking_access, BookingAccess};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingInfo {
    pub id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub menu_item: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// List bookings for the logged-in admin's restaurant. The owner filter
/// is always the caller; a status query filter may narrow further.
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingInfo>>> {
    let mut find = booking::Entity::find()
        .filter(booking::Column::OwnerId.eq(admin.id()));

    if let Some(raw) = &query.status {
        let status = BookingStatus::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid status: {}", raw)))?;
        find = find.filter(booking::Column::Status.eq(status));
    }

    let bookings = find
        .order_by_desc(booking::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let users = user::Entity::find().all(&state.db).await?;
    let items = menu_item::Entity::find()
        .filter(menu_item::Column::OwnerId.eq(admin.id()))
        .all(&state.db)
        .await?;

    let responses: Vec<BookingInfo> = bookings
        .into_iter()
        .map(|b| {
            let customer = users.iter().find(|u| u.id == b.user_id);
            let item = b
                .menu_item_id
                .and_then(|id| items.iter().find(|m| m.id == id));

            BookingInfo {
                id: b.id,
                user_name: customer.map(|u| u.name.clone()).unwrap_or_default(),
                user_email: customer.map(|u| u.email.clone()).unwrap_or_default(),
                menu_item: item.map(|m| m.name.clone()),
                name: b.name,
                email: b.email,
                phone: b.phone,
                date: b.date,
                time: b.time,
                guests: b.guests,
                special_requests: b.special_requests,
                status: b.status,
                created_at: b.created_at.with_timezone(&Utc),
            }
        })
        .collect();

    Ok(Json(responses))
}

#[derive(Debug, Serialize)]
pub struct BookingStats {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub rejected: u64,
    pub total_guests: i64,
}

/// Aggregate counts for the logged-in admin's restaurant only. Never
/// computed globally, so tenants cannot observe each other through
/// aggregates.
pub async fn booking_stats(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
) -> AppResult<Json<BookingStats>> {
    let scoped =
        || booking::Entity::find().filter(booking::Column::OwnerId.eq(admin.id()));

    let total = scoped().count(&state.db).await?;
    let pending = scoped()
        .filter(booking::Column::Status.eq(BookingStatus::Pending))
        .count(&state.db)
        .await?;
    let confirmed = scoped()
        .filter(booking::Column::Status.eq(BookingStatus::Confirmed))
        .count(&state.db)
        .await?;
    let rejected = scoped()
        .filter(booking::Column::Status.eq(BookingStatus::Rejected))
        .count(&state.db)
        .await?;

    let total_guests: i64 = scoped()
        .all(&state.db)
        .await?
        .iter()
        .map(|b| i64::from(b.guests))
        .sum();

    Ok(Json(BookingStats {
        total,
        pending,
        confirmed,
        rejected,
        total_guests,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Transition a booking out of PENDING (confirm or reject)
pub async fn update_booking_status(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let new_status = BookingStatus::parse(&payload.status)
        .filter(|s| *s != BookingStatus::Pending)
        .ok_or_else(|| AppError::BadRequest("Invalid status value".to_string()))?;

    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking_access(admin.role(), admin.id(), &booking) != Some(BookingAccess::Manage) {
        return Err(AppError::Forbidden(
            "Not authorized to access this booking".to_string(),
        ));
    }

    if !booking.status.can_transition_to(new_status) {
        return Err(AppError::InvalidTransition(format!(
            "Cannot move a {:?} booking to {:?}",
            booking.status, new_status
        )));
    }

    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(new_status);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.db).await?;

    // Post-commit, fire-and-forget
    send_booking_notification(&state, &updated, new_status);

    Ok(Json(serde_json::json!({
        "message": format!("Booking {}", payload.status.to_lowercase()),
        "booking": updated,
    })))
}

/// Hard delete a booking in any state, still tenant-gated
pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking_access(admin.role(), admin.id(), &booking) != Some(BookingAccess::Manage) {
        return Err(AppError::Forbidden(
            "Not authorized to access this booking".to_string(),
        ));
    }

    booking::Entity::delete_by_id(booking_id)
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Booking deleted" })))
}
