//! HTTP handlers for the product catalog

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{classify, ClassifiedProduct, CreateProductInput, Product, UpdateProductInput};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require_catalog_manager, CurrentUser};
use crate::services::ProductService;
use crate::AppState;

/// Query string shared by the searchable list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    /// The search text, ignoring an empty parameter
    pub fn text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

fn classified(product: Product) -> ClassifiedProduct {
    ClassifiedProduct {
        is_low_stock: product.is_low_stock(),
        product,
    }
}

/// List products with their low-stock flag
pub async fn list_products(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ClassifiedProduct>>> {
    let service = ProductService::new(state.db);
    let products = service.list(query.text()).await?;
    Ok(Json(classify(&products)))
}

/// Get a product
pub async fn get_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ClassifiedProduct>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(classified(product)))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<ClassifiedProduct>)> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(classified(product))))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<ClassifiedProduct>> {
    let service = ProductService::new(state.db);
    let product = service.update(product_id, input).await?;
    Ok(Json(classified(product)))
}

/// Delete a product (admin or manager)
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_catalog_manager(&current_user.0)?;
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
