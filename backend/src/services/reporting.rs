//! Reporting service for the report page and its transaction export

use chrono::{DateTime, Utc};
use shared::{export_csv, transaction_export_columns, ReportRange, StockReport};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::{ProductService, TransactionService};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    products: ProductService,
    transactions: TransactionService,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self {
            products: ProductService::new(db.clone()),
            transactions: TransactionService::new(db),
        }
    }

    /// Report page data for `range` ending at `as_of`
    pub async fn report(&self, range: ReportRange, as_of: DateTime<Utc>) -> AppResult<StockReport> {
        let products = self.products.list(None).await?;
        let transactions = self.transactions.since(range.start(as_of)).await?;

        let report = StockReport::build(range, products, transactions, as_of);
        tracing::debug!(
            range = range.as_str(),
            total_transactions = report.total_transactions,
            low_stock = report.low_stock_items.len(),
            "Built stock report"
        );
        Ok(report)
    }

    /// Transactions of `range` as CSV
    pub async fn export(&self, range: ReportRange, as_of: DateTime<Utc>) -> AppResult<String> {
        let transactions = self.transactions.since(range.start(as_of)).await?;
        Ok(export_csv(&transactions, &transaction_export_columns()))
    }
}
