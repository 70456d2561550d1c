//! HTTP handlers for the report page

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use shared::{ReportRange, StockReport};

use crate::error::{AppError, AppResult};
use crate::handlers::csv_attachment;
use crate::middleware::CurrentUser;
use crate::services::ReportingService;
use crate::AppState;

/// Report query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub range: Option<String>,
}

impl ReportQuery {
    /// Selected range, `30days` when absent
    pub fn range(&self) -> AppResult<ReportRange> {
        match self.range.as_deref() {
            None | Some("") => Ok(ReportRange::default()),
            Some(value) => value
                .parse()
                .map_err(|e: shared::ParseEnumError| AppError::invalid_field("range", e.to_string())),
        }
    }
}

/// Report page data
pub async fn get_report(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<StockReport>> {
    let range = query.range()?;
    let service = ReportingService::new(state.db);
    let report = service.report(range, Utc::now()).await?;
    Ok(Json(report))
}

/// Download the transactions of the selected range
pub async fn export_report(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let range = query.range()?;
    let service = ReportingService::new(state.db);
    let csv = service.export(range, Utc::now()).await?;
    Ok(csv_attachment(&range.export_file_name(), csv))
}
