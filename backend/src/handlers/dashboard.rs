//! HTTP handlers for the dashboard cards, charts and stock exports

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use shared::{StockSummary, TrendPoint, STOCK_LIST_FILE, STOCK_REPORT_FILE};

use crate::error::AppResult;
use crate::handlers::csv_attachment;
use crate::middleware::CurrentUser;
use crate::services::DashboardService;
use crate::AppState;

fn service(state: AppState) -> DashboardService {
    DashboardService::new(state.db, state.config.dashboard.clone())
}

/// Headline counts
pub async fn get_summary(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<StockSummary>> {
    let summary = service(state).summary(Utc::now()).await?;
    Ok(Json(summary))
}

/// Stock movement chart
pub async fn get_trend(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<TrendPoint>>> {
    Ok(Json(service(state).trend().await?))
}

/// Recent transactions chart
pub async fn get_recent(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<TrendPoint>>> {
    Ok(Json(service(state).recent().await?))
}

/// Download the quick stock report
pub async fn export_stock_report(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let csv = service(state).stock_report_csv().await?;
    Ok(csv_attachment(STOCK_REPORT_FILE, csv))
}

/// Download the detailed stock list
pub async fn export_stock_list(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let csv = service(state).stock_list_csv().await?;
    Ok(csv_attachment(STOCK_LIST_FILE, csv))
}
