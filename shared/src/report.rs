//! Stock reports and CSV layouts
//!
//! Assembles the report page data from fetched rows and defines the column
//! layouts of the three CSV downloads.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::{daily_movements, ColumnSpec, DailyMovement};
use crate::models::{Product, TransactionWithProduct};
use crate::types::ParseEnumError;

/// File name of the dashboard's quick stock report
pub const STOCK_REPORT_FILE: &str = "stock_report.csv";

/// File name of the dashboard's detailed stock list
pub const STOCK_LIST_FILE: &str = "detailed_stock_list.csv";

/// Timestamp format of the transaction export
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time range selectable on the report page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportRange {
    #[serde(rename = "7days")]
    Last7Days,
    #[default]
    #[serde(rename = "30days")]
    Last30Days,
    /// From the first instant of the current calendar month (UTC)
    #[serde(rename = "month")]
    ThisMonth,
}

impl ReportRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportRange::Last7Days => "7days",
            ReportRange::Last30Days => "30days",
            ReportRange::ThisMonth => "month",
        }
    }

    /// First instant included in the range ending at `as_of`
    pub fn start(&self, as_of: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ReportRange::Last7Days => as_of - Duration::days(7),
            ReportRange::Last30Days => as_of - Duration::days(30),
            ReportRange::ThisMonth => {
                let today = as_of.date_naive();
                let first = today.with_day(1).unwrap_or(today);
                Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN))
            }
        }
    }

    /// File name of the transaction export for this range
    pub fn export_file_name(&self) -> String {
        format!("stock_report_{}.csv", self.as_str())
    }
}

impl FromStr for ReportRange {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7days" => Ok(ReportRange::Last7Days),
            "30days" => Ok(ReportRange::Last30Days),
            "month" => Ok(ReportRange::ThisMonth),
            other => Err(ParseEnumError::ReportRange(other.to_string())),
        }
    }
}

/// Data behind the report page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockReport {
    pub range: ReportRange,
    /// Ordered by current stock, lowest first
    pub products: Vec<Product>,
    /// Transactions inside the range, oldest first
    pub transactions: Vec<TransactionWithProduct>,
    pub low_stock_items: Vec<Product>,
    pub total_transactions: usize,
    pub daily_movements: Vec<DailyMovement>,
}

impl StockReport {
    /// Build the report from fetched rows.
    ///
    /// `transactions` must be ascending by `created_at`; entries before the
    /// range start are dropped.
    pub fn build(
        range: ReportRange,
        mut products: Vec<Product>,
        transactions: Vec<TransactionWithProduct>,
        as_of: DateTime<Utc>,
    ) -> Self {
        let start = range.start(as_of);
        let transactions: Vec<_> = transactions
            .into_iter()
            .filter(|t| t.transaction.created_at >= start)
            .collect();

        products.sort_by_key(|p| p.current_stock);
        let low_stock_items = products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect();

        Self {
            range,
            total_transactions: transactions.len(),
            daily_movements: daily_movements(&transactions),
            products,
            transactions,
            low_stock_items,
        }
    }
}

/// Columns of the quick stock report
pub fn stock_report_columns() -> Vec<ColumnSpec<Product>> {
    vec![
        ColumnSpec::new("Name", |p: &Product| p.name.clone()),
        ColumnSpec::new("SKU", |p: &Product| p.sku.clone()),
        ColumnSpec::new("Current Stock", |p: &Product| p.current_stock.to_string()),
        ColumnSpec::new("Minimum Stock", |p: &Product| p.minimum_stock.to_string()),
    ]
}

/// Columns of the detailed stock list
pub fn stock_list_columns() -> Vec<ColumnSpec<Product>> {
    vec![
        ColumnSpec::new("Name", |p: &Product| p.name.clone()),
        ColumnSpec::new("SKU", |p: &Product| p.sku.clone()),
        ColumnSpec::new("Description", |p: &Product| {
            p.description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "N/A".to_string())
        }),
        ColumnSpec::new("Current Stock", |p: &Product| p.current_stock.to_string()),
        ColumnSpec::new("Minimum Stock", |p: &Product| p.minimum_stock.to_string()),
        ColumnSpec::new("Status", |p: &Product| p.stock_status().to_string()),
    ]
}

/// Columns of the report page transaction export
pub fn transaction_export_columns() -> Vec<ColumnSpec<TransactionWithProduct>> {
    vec![
        ColumnSpec::new("Date", |t: &TransactionWithProduct| {
            t.transaction
                .created_at
                .format(EXPORT_DATE_FORMAT)
                .to_string()
        }),
        ColumnSpec::new("Type", |t: &TransactionWithProduct| {
            t.transaction.transaction_type.as_str().to_string()
        }),
        ColumnSpec::new("Product", |t: &TransactionWithProduct| t.product.name.clone()),
        ColumnSpec::new("SKU", |t: &TransactionWithProduct| t.product.sku.clone()),
        ColumnSpec::new("Quantity", |t: &TransactionWithProduct| {
            t.transaction.quantity.to_string()
        }),
    ]
}
