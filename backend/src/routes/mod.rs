//! Route definitions for the stock ledger API

use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/products", product_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/categories", category_routes())
        .nest("/transactions", transaction_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/reports", report_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        .merge(protected)
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}

/// Supplier routes with product links
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route(
            "/:supplier_id/products",
            get(handlers::list_supplier_products).post(handlers::link_product),
        )
        .route(
            "/:supplier_id/products/:product_id",
            delete(handlers::unlink_product),
        )
}

/// Category routes
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_categories).post(handlers::create_category))
        .route(
            "/:category_id",
            put(handlers::update_category).delete(handlers::delete_category),
        )
}

/// Stock transaction routes
fn transaction_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_transactions).post(handlers::record_transaction),
    )
}

/// Dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/trend", get(handlers::get_trend))
        .route("/recent", get(handlers::get_recent))
        .route("/export/stock-report", get(handlers::export_stock_report))
        .route("/export/stock-list", get(handlers::export_stock_list))
}

/// Report page routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_report))
        .route("/export", get(handlers::export_report))
}
