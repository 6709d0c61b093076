use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::user::{self, UserRole};
use crate::entities::menu_item;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::utils::notify::send_booking_notification;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub owner_id: Option<Uuid>,
    pub menu_item_id: Option<Uuid>,
}

fn validate_booking_fields(date: NaiveDate, guests: i32, today: NaiveDate) -> AppResult<()> {
    if date <= today {
        return Err(AppError::BadRequest(
            "Booking date must be in the future".to_string(),
        ));
    }

    if !(1..=20).contains(&guests) {
        return Err(AppError::BadRequest(
            "Guests must be between 1 and 20".to_string(),
        ));
    }

    Ok(())
}

/// Resolve the tenant a new booking belongs to: the owner of the
/// referenced menu item, else an explicitly supplied admin id, else the
/// first registered admin when the configurable fallback is enabled.
async fn resolve_owner(
    state: &AppState,
    menu_item_id: Option<Uuid>,
    owner_id: Option<Uuid>,
) -> AppResult<Uuid> {
    if let Some(item_id) = menu_item_id {
        let item = menu_item::Entity::find_by_id(item_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;
        return Ok(item.owner_id);
    }

    if let Some(owner_id) = owner_id {
        let owner = user::Entity::find_by_id(owner_id).one(&state.db).await?;
        return match owner {
            Some(u) if u.role == UserRole::Admin => Ok(u.id),
            _ => Err(AppError::BadRequest(
                "Invalid restaurant owner".to_string(),
            )),
        };
    }

    if state.config.booking_fallback_tenant {
        let first_admin = user::Entity::find()
            .filter(user::Column::Role.eq(UserRole::Admin))
            .order_by_asc(user::Column::CreatedAt)
            .one(&state.db)
            .await?;

        if let Some(admin) = first_admin {
            return Ok(admin.id);
        }
    }

    Err(AppError::NoTenantAvailable)
}

/// Create a booking (starts PENDING)
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.phone.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Name, email and phone are required".to_string(),
        ));
    }

    validate_booking_fields(payload.date, payload.guests, Utc::now().date_naive())?;

    let owner_id = resolve_owner(&state, payload.menu_item_id, payload.owner_id).await?;

    let new_booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id()),
        owner_id: Set(owner_id),
        menu_item_id: Set(payload.menu_item_id),
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        date: Set(payload.date),
        time: Set(payload.time),
        guests: Set(payload.guests),
        special_requests: Set(payload.special_requests),
        status: Set(BookingStatus::Pending),
        ..Default::default()
    };

    let booking = new_booking.insert(&state.db).await?;

    // Post-commit, fire-and-forget
    send_booking_notification(&state, &booking, BookingStatus::Pending);

    Ok(Json(serde_json::json!({
        "message": "Booking request submitted! You will be notified once approved.",
        "booking": booking,
    })))
}

/// List the caller's own bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<booking::Model>>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::UserId.eq(user.id()))
        .order_by_desc(booking::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(bookings))
}

/// Cancel an own booking, only while it is still PENDING
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != user.id() {
        return Err(AppError::Forbidden(
            "You can only cancel your own bookings".to_string(),
        ));
    }

    if booking.status != BookingStatus::Pending {
        return Err(AppError::InvalidTransition(
            "Only pending bookings can be cancelled".to_string(),
        ));
    }

    booking::Entity::delete_by_id(booking_id)
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Booking cancelled" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_must_be_strictly_in_the_future() {
        let today = day(2026, 8, 28);
        assert!(validate_booking_fields(day(2026, 8, 29), 2, today).is_ok());
        assert!(validate_booking_fields(today, 2, today).is_err());
        assert!(validate_booking_fields(day(2026, 8, 27), 2, today).is_err());
    }

    #[test]
    fn guests_bounded_one_to_twenty() {
        let today = day(2026, 8, 28);
        let future = day(2026, 9, 1);
        assert!(validate_booking_fields(future, 1, today).is_ok());
        assert!(validate_booking_fields(future, 20, today).is_ok());
        assert!(validate_booking_fields(future, 0, today).is_err());
        assert!(validate_booking_fields(future, 21, today).is_err());
    }
}
