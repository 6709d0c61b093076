use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::testimonial;
use crate::entities::user::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{authorize, CurrentUser};
use crate::AppState;

/// Public: approved testimonials only
pub async fn list_approved(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<testimonial::Model>>> {
    let testimonials = testimonial::Entity::find()
        .filter(testimonial::Column::IsApproved.eq(true))
        .order_by_desc(testimonial::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(testimonials))
}

/// All testimonials, approved or not (admin)
pub async fn list_all(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<testimonial::Model>>> {
    authorize(&user, &[UserRole::Admin])?;

    let testimonials = testimonial::Entity::find()
        .order_by_desc(testimonial::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(testimonials))
}

#[derive(Debug, Deserialize)]
pub struct CreateTestimonialRequest {
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub message: String,
    pub avatar: Option<String>,
}

/// Anyone may submit; stays hidden until an admin approves it
pub async fn create_testimonial(
    State(state): State<AppState>,
    Json(payload): Json<CreateTestimonialRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.message.trim().is_empty()
    {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let new_testimonial = testimonial::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        rating: Set(payload.rating),
        message: Set(payload.message),
        avatar: Set(payload.avatar),
        is_approved: Set(false),
        ..Default::default()
    };

    let saved = new_testimonial.insert(&state.db).await?;

    Ok(Json(serde_json::json!({
        "message": "Thank you for your feedback! It will be reviewed before publishing.",
        "testimonial": saved,
    })))
}

/// Approve a testimonial for public display (admin)
pub async fn approve_testimonial(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<testimonial::Model>> {
    authorize(&user, &[UserRole::Admin])?;

    let testimonial = testimonial::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;

    let mut active: testimonial::ActiveModel = testimonial.into();
    active.is_approved = Set(true);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.db).await?;

    Ok(Json(updated))
}

/// Delete a testimonial (admin)
pub async fn delete_testimonial(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    authorize(&user, &[UserRole::Admin])?;

    let result = testimonial::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Testimonial not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Testimonial deleted" })))
}
