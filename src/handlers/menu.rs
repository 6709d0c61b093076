use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::menu_item::{self, MenuCategory, SpiceLevel};
use crate::entities::user::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{authorize, CurrentUser};
use crate::utils::ownership::can_manage_menu_item;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub veg: Option<bool>,
    pub min_rating: Option<f64>,
    pub owner: Option<Uuid>,
}

/// Public menu listing. Only available items are ever returned; the
/// remaining filters come straight from the query string, which is safe
/// because this is public data.
pub async fn list_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<menu_item::Model>>> {
    let mut find = menu_item::Entity::find()
        .filter(menu_item::Column::IsAvailable.eq(true));

    if let Some(raw) = &query.category {
        let category = MenuCategory::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid category: {}", raw)))?;
        find = find.filter(menu_item::Column::Category.eq(category));
    }

    if let Some(veg) = query.veg {
        find = find.filter(menu_item::Column::IsVeg.eq(veg));
    }

    if let Some(min_rating) = query.min_rating {
        find = find.filter(menu_item::Column::AverageRating.gte(min_rating));
    }

    if let Some(owner) = query.owner {
        find = find.filter(menu_item::Column::OwnerId.eq(owner));
    }

    let items = find
        .order_by_desc(menu_item::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(items))
}

/// Public menu item detail
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<menu_item::Model>> {
    let item = menu_item::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

    Ok(Json(item))
}

/// Tenant-scoped listing for the logged-in admin. The owner filter is
/// forced to the caller; a client-supplied owner parameter is ignored.
pub async fn my_menu(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<menu_item::Model>>> {
    authorize(&user, &[UserRole::Admin])?;

    let items = menu_item::Entity::find()
        .filter(menu_item::Column::OwnerId.eq(user.id()))
        .order_by_desc(menu_item::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    pub image: String,
    pub is_available: Option<bool>,
    pub is_veg: Option<bool>,
    pub ingredients: Option<Vec<String>>,
    pub spice_level: Option<SpiceLevel>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<MenuCategory>,
    pub image: Option<String>,
    pub is_available: Option<bool>,
    pub is_veg: Option<bool>,
    pub ingredients: Option<Vec<String>>,
    pub spice_level: Option<SpiceLevel>,
}

/// Create a menu item owned by the calling admin
pub async fn create_menu_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateMenuItemRequest>,
) -> AppResult<Json<menu_item::Model>> {
    authorize(&user, &[UserRole::Admin])?;

    if payload.name.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and description are required".to_string(),
        ));
    }

    if payload.price <= 0.0 {
        return Err(AppError::BadRequest("Price must be positive".to_string()));
    }

    let item = menu_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        category: Set(payload.category),
        image: Set(payload.image),
        is_available: Set(payload.is_available.unwrap_or(true)),
        is_veg: Set(payload.is_veg.unwrap_or(false)),
        ingredients: Set(serde_json::json!(payload.ingredients.unwrap_or_default())),
        spice_level: Set(payload.spice_level.unwrap_or(SpiceLevel::Mild)),
        average_rating: Set(0.0),
        review_count: Set(0),
        order_count: Set(0),
        owner_id: Set(user.id()),
        ..Default::default()
    };

    let result = item.insert(&state.db).await?;
    Ok(Json(result))
}

/// Update an owned menu item. The derived rating fields are not part of
/// the payload and cannot be set by clients.
pub async fn update_menu_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> AppResult<Json<menu_item::Model>> {
    authorize(&user, &[UserRole::Admin])?;

    let item = menu_item::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

    if !can_manage_menu_item(user.role(), user.id(), &item) {
        return Err(AppError::Forbidden(
            "Not authorized to modify this menu item".to_string(),
        ));
    }

    let mut active: menu_item::ActiveModel = item.into();

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }
        active.name = Set(name);
    }

    if let Some(description) = payload.description {
        active.description = Set(description);
    }

    if let Some(price) = payload.price {
        if price <= 0.0 {
            return Err(AppError::BadRequest("Price must be positive".to_string()));
        }
        active.price = Set(price);
    }

    if let Some(category) = payload.category {
        active.category = Set(category);
    }

    if let Some(image) = payload.image {
        active.image = Set(image);
    }

    if let Some(is_available) = payload.is_available {
        active.is_available = Set(is_available);
    }

    if let Some(is_veg) = payload.is_veg {
        active.is_veg = Set(is_veg);
    }

    if let Some(ingredients) = payload.ingredients {
        active.ingredients = Set(serde_json::json!(ingredients));
    }

    if let Some(spice_level) = payload.spice_level {
        active.spice_level = Set(spice_level);
    }

    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    Ok(Json(result))
}

/// Delete an owned menu item (its reviews cascade)
pub async fn delete_menu_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    authorize(&user, &[UserRole::Admin])?;

    let item = menu_item::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

    if !can_manage_menu_item(user.role(), user.id(), &item) {
        return Err(AppError::Forbidden(
            "Not authorized to modify this menu item".to_string(),
        ));
    }

    menu_item::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "Menu item deleted" })))
}
