//! HTTP handlers for stock transactions

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{RecordTransactionInput, TransactionType, TransactionWithProduct};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::{TransactionFilter, TransactionService};
use crate::AppState;

/// Query parameters for the transaction list
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<TransactionQuery> for TransactionFilter {
    type Error = AppError;

    fn try_from(query: TransactionQuery) -> Result<Self, Self::Error> {
        // "all" and an empty value both mean no type filter
        let transaction_type = match query.transaction_type.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(value) => Some(
                value
                    .parse::<TransactionType>()
                    .map_err(|e| AppError::invalid_field("type", e.to_string()))?,
            ),
        };
        let search = query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(TransactionFilter {
            transaction_type,
            search,
        })
    }
}

/// List transactions, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<Vec<TransactionWithProduct>>> {
    let filter = TransactionFilter::try_from(query)?;
    let service = TransactionService::new(state.db);
    let transactions = service.list(&filter).await?;
    Ok(Json(transactions))
}

/// Record a stock transaction
pub async fn record_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordTransactionInput>,
) -> AppResult<(StatusCode, Json<TransactionWithProduct>)> {
    let service = TransactionService::new(state.db);
    let transaction = service.record(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
