//! Dashboard service: headline counts, movement charts and stock exports
//!
//! Every call re-fetches its rows, so the views reflect any write that
//! happened before the request.

use chrono::{DateTime, Utc};
use shared::{
    export_csv, monthly_window_start, stock_list_columns, stock_report_columns, summarize, trend,
    StockSummary, TrendPoint,
};
use sqlx::PgPool;

use crate::config::DashboardConfig;
use crate::error::AppResult;
use crate::services::{ProductService, SupplierService, TransactionService};

#[derive(Clone)]
pub struct DashboardService {
    products: ProductService,
    suppliers: SupplierService,
    transactions: TransactionService,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(db: PgPool, config: DashboardConfig) -> Self {
        Self {
            products: ProductService::new(db.clone()),
            suppliers: SupplierService::new(db.clone()),
            transactions: TransactionService::new(db),
            config,
        }
    }

    /// Headline counts as of `as_of`
    pub async fn summary(&self, as_of: DateTime<Utc>) -> AppResult<StockSummary> {
        let products = self.products.list(None).await?;
        let suppliers = self.suppliers.list(None).await?;
        let transactions = self
            .transactions
            .since(monthly_window_start(as_of))
            .await?;

        let summary = summarize(&products, &suppliers, &transactions, as_of);
        tracing::debug!(?summary, "Computed stock summary");
        Ok(summary)
    }

    /// Stock movement chart over the most recent transactions
    pub async fn trend(&self) -> AppResult<Vec<TrendPoint>> {
        let transactions = self.transactions.latest(self.config.trend_limit).await?;
        Ok(trend(&transactions, self.config.trend_limit))
    }

    /// Recent transactions chart: the tail of the movement chart
    pub async fn recent(&self) -> AppResult<Vec<TrendPoint>> {
        let transactions = self.transactions.latest(self.config.trend_limit).await?;
        let points = trend(&transactions, self.config.trend_limit);
        Ok(recent_points(points, self.config.recent_limit))
    }

    /// Quick stock report CSV
    pub async fn stock_report_csv(&self) -> AppResult<String> {
        let products = self.products.list(None).await?;
        Ok(export_csv(&products, &stock_report_columns()))
    }

    /// Detailed stock list CSV
    pub async fn stock_list_csv(&self) -> AppResult<String> {
        let products = self.products.list(None).await?;
        Ok(export_csv(&products, &stock_list_columns()))
    }
}

/// Keep the last `limit` points
fn recent_points(mut points: Vec<TrendPoint>, limit: usize) -> Vec<TrendPoint> {
    let skip = points.len().saturating_sub(limit);
    points.drain(..skip);
    points
}
