//! HTTP handlers for suppliers and their product links

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::{
    CreateSupplierInput, LinkProductInput, LinkedProduct, ProductSupplier, Supplier,
    UpdateSupplierInput,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::product::SearchQuery;
use crate::middleware::{require_catalog_manager, CurrentUser};
use crate::services::SupplierService;
use crate::AppState;

/// List suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list(query.text()).await?;
    Ok(Json(suppliers))
}

/// Get a supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get(supplier_id).await?;
    Ok(Json(supplier))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = SupplierService::new(state.db);
    let supplier = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.update(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Delete a supplier (admin or manager)
pub async fn delete_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_catalog_manager(&current_user.0)?;
    let service = SupplierService::new(state.db);
    service.delete(supplier_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Products linked to a supplier
pub async fn list_supplier_products(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Vec<LinkedProduct>>> {
    let service = SupplierService::new(state.db);
    let products = service.linked_products(supplier_id).await?;
    Ok(Json(products))
}

/// Link a product to a supplier
pub async fn link_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<LinkProductInput>,
) -> AppResult<(StatusCode, Json<ProductSupplier>)> {
    let service = SupplierService::new(state.db);
    let link = service.link_product(supplier_id, input).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Remove a product link
pub async fn unlink_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path((supplier_id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = SupplierService::new(state.db);
    service.unlink_product(supplier_id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
