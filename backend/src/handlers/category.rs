//! HTTP handlers for product categories

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{Category, CategoryInput};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require_catalog_manager, CurrentUser};
use crate::services::CategoryService;
use crate::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Category>>> {
    let service = CategoryService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CategoryInput>,
) -> AppResult<(StatusCode, Json<Category>)> {
    require_catalog_manager(&current_user.0)?;
    let service = CategoryService::new(state.db);
    let category = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<Category>> {
    require_catalog_manager(&current_user.0)?;
    let service = CategoryService::new(state.db);
    Ok(Json(service.update(category_id, input).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_catalog_manager(&current_user.0)?;
    let service = CategoryService::new(state.db);
    service.delete(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
