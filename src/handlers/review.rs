use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::user::UserRole;
use crate::entities::{menu_item, review, user};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{authorize, CurrentUser};
use crate::utils::rating::recompute_menu_rating;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub user_name: String,
    pub admin_reply: Option<String>,
    pub replied_by_name: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

fn to_response(r: review::Model, users: &[user::Model]) -> ReviewResponse {
    let author = users.iter().find(|u| u.id == r.user_id);
    let replier = r.replied_by.and_then(|id| users.iter().find(|u| u.id == id));

    ReviewResponse {
        id: r.id,
        menu_item_id: r.menu_item_id,
        rating: r.rating,
        comment: r.comment,
        user_name: author.map(|u| u.name.clone()).unwrap_or_default(),
        admin_reply: r.admin_reply,
        replied_by_name: replier.map(|u| u.name.clone()),
        replied_at: r.replied_at.map(|t| t.with_timezone(&Utc)),
        created_at: r.created_at.with_timezone(&Utc),
    }
}

fn validate_review_fields(rating: i32, comment: &str) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let len = comment.trim().chars().count();
    if !(10..=500).contains(&len) {
        return Err(AppError::BadRequest(
            "Comment must be 10-500 characters".to_string(),
        ));
    }

    Ok(())
}

/// The pre-insert duplicate check races with concurrent inserts; the
/// unique index on (menu_item_id, user_id) is the real guard, so a
/// violation there is a Conflict, not an internal error.
fn duplicate_review_conflict(sql_err: Option<SqlErr>) -> Option<AppError> {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => Some(AppError::Conflict(
            "You already reviewed this item".to_string(),
        )),
        _ => None,
    }
}

/// Public: reviews for a menu item
pub async fn list_menu_reviews(
    State(state): State<AppState>,
    Path(menu_item_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let reviews = review::Entity::find()
        .filter(review::Column::MenuItemId.eq(menu_item_id))
        .order_by_desc(review::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let users = user::Entity::find().all(&state.db).await?;

    let responses = reviews
        .into_iter()
        .map(|r| to_response(r, &users))
        .collect();

    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub menu_item_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

/// Create a review; one per (menu item, user) pair
pub async fn create_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    validate_review_fields(payload.rating, &payload.comment)?;

    menu_item::Entity::find_by_id(payload.menu_item_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

    let existing = review::Entity::find()
        .filter(review::Column::MenuItemId.eq(payload.menu_item_id))
        .filter(review::Column::UserId.eq(user.id()))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "You already reviewed this item".to_string(),
        ));
    }

    let new_review = review::ActiveModel {
        id: Set(Uuid::new_v4()),
        menu_item_id: Set(payload.menu_item_id),
        user_id: Set(user.id()),
        rating: Set(payload.rating),
        comment: Set(payload.comment.trim().to_string()),
        ..Default::default()
    };

    let saved = match new_review.insert(&state.db).await {
        Ok(saved) => saved,
        Err(err) => {
            return Err(duplicate_review_conflict(err.sql_err()).unwrap_or_else(|| err.into()))
        }
    };

    recompute_menu_rating(&state.db, saved.menu_item_id).await?;

    Ok(Json(to_response(saved, std::slice::from_ref(&user.0))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: i32,
    pub comment: String,
}

/// Update an own review
pub async fn update_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<review::Model>> {
    validate_review_fields(payload.rating, &payload.comment)?;

    let review = review::Entity::find_by_id(review_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    if review.user_id != user.id() {
        return Err(AppError::Forbidden(
            "You can only edit your own reviews".to_string(),
        ));
    }

    let menu_item_id = review.menu_item_id;

    let mut active: review::ActiveModel = review.into();
    active.rating = Set(payload.rating);
    active.comment = Set(payload.comment.trim().to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.db).await?;

    recompute_menu_rating(&state.db, menu_item_id).await?;

    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
}

/// Reply to a review on an owned menu item (admin)
pub async fn reply_to_review(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<ReplyRequest>,
) -> AppResult<Json<review::Model>> {
    authorize(&admin, &[UserRole::Admin])?;

    let reply = payload.reply.trim();
    let len = reply.chars().count();
    if !(5..=500).contains(&len) {
        return Err(AppError::BadRequest(
            "Reply must be 5-500 characters".to_string(),
        ));
    }

    let review = review::Entity::find_by_id(review_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    let item = menu_item::Entity::find_by_id(review.menu_item_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

    if item.owner_id != admin.id() {
        return Err(AppError::Forbidden(
            "Can only reply to reviews on your items".to_string(),
        ));
    }

    let mut active: review::ActiveModel = review.into();
    active.admin_reply = Set(Some(reply.to_string()));
    active.replied_by = Set(Some(admin.id()));
    active.replied_at = Set(Some(Utc::now().into()));
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.db).await?;

    Ok(Json(updated))
}

/// Delete a review (author or any admin); rating is recomputed after
pub async fn delete_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(review_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let review = review::Entity::find_by_id(review_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    let is_author = review.user_id == user.id();
    if !is_author && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Not authorized to delete this review".to_string(),
        ));
    }

    let menu_item_id = review.menu_item_id;

    review::Entity::delete_by_id(review_id)
        .exec(&state.db)
        .await?;

    recompute_menu_rating(&state.db, menu_item_id).await?;

    Ok(Json(serde_json::json!({ "message": "Review deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        let comment = "Really tasty, would order again";
        assert!(validate_review_fields(1, comment).is_ok());
        assert!(validate_review_fields(5, comment).is_ok());
        assert!(validate_review_fields(0, comment).is_err());
        assert!(validate_review_fields(6, comment).is_err());
    }

    #[test]
    fn comment_length_bounds() {
        assert!(validate_review_fields(4, "too short").is_err());
        assert!(validate_review_fields(4, "long enough to pass validation").is_ok());
        assert!(validate_review_fields(4, &"x".repeat(501)).is_err());
    }

    #[test]
    fn duplicate_insert_maps_to_conflict() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let err = duplicate_review_conflict(Some(SqlErr::UniqueConstraintViolation(
            "idx_review_menu_item_user".to_string(),
        )))
        .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn non_duplicate_errors_pass_through() {
        assert!(duplicate_review_conflict(None).is_none());
    }
}
