//! Stock ledger aggregation
//!
//! Pure transformations from already-fetched product, supplier and
//! transaction rows into the derived views the dashboard renders:
//! low-stock classification, headline counts, the signed movement trend,
//! per-day movement totals and CSV text.
//!
//! Nothing here performs I/O or keeps state. Inputs are borrowed and never
//! validated: a negative `current_stock` is classified like any other value.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Product, Supplier, Transaction, TransactionType};

/// Length of the trailing window counted as "monthly" transactions
pub const MONTHLY_WINDOW_DAYS: i64 = 30;

/// Short US date used for trend labels, e.g. `3/7/2024`
pub const TREND_LABEL_FORMAT: &str = "%-m/%-d/%Y";

/// Day label used to bucket report movements, e.g. `Mar 07`
pub const DAY_LABEL_FORMAT: &str = "%b %d";

/// Low stock is inclusive: a product sitting exactly at its minimum is low.
pub fn is_low_stock(current_stock: i32, minimum_stock: i32) -> bool {
    current_stock <= minimum_stock
}

/// A product together with its low-stock flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedProduct {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "isLowStock")]
    pub is_low_stock: bool,
}

/// Headline counts for the dashboard cards
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_products: usize,
    pub low_stock_items: usize,
    /// Every supplier on record; no activity filter is applied
    pub active_suppliers: usize,
    pub monthly_transactions: usize,
}

/// One point of the stock movement chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    #[serde(rename = "name")]
    pub label: String,
    pub value: i64,
}

/// Quantities moved on one day, by kind
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyMovement {
    pub date: String,
    pub sales: i64,
    pub purchases: i64,
    pub damages: i64,
}

/// Attach the low-stock flag to each product, preserving order
pub fn classify(products: &[Product]) -> Vec<ClassifiedProduct> {
    products
        .iter()
        .map(|product| ClassifiedProduct {
            is_low_stock: product.is_low_stock(),
            product: product.clone(),
        })
        .collect()
}

/// Start of the trailing monthly window ending at `as_of`
pub fn monthly_window_start(as_of: DateTime<Utc>) -> DateTime<Utc> {
    as_of - Duration::days(MONTHLY_WINDOW_DAYS)
}

/// Compute the dashboard headline counts.
///
/// `as_of` is supplied by the caller so the result is a pure function of its
/// arguments. A transaction counts towards the month when
/// `created_at >= as_of - 30 days`.
pub fn summarize<T: AsRef<Transaction>>(
    products: &[Product],
    suppliers: &[Supplier],
    transactions: &[T],
    as_of: DateTime<Utc>,
) -> StockSummary {
    let window_start = monthly_window_start(as_of);

    StockSummary {
        total_products: products.len(),
        low_stock_items: classify(products)
            .iter()
            .filter(|p| p.is_low_stock)
            .count(),
        active_suppliers: suppliers.len(),
        monthly_transactions: transactions
            .iter()
            .filter(|t| t.as_ref().created_at >= window_start)
            .count(),
    }
}

/// Signed chart value of a transaction: purchases add, every other type
/// subtracts (transfers in included).
pub fn signed_quantity(transaction: &Transaction) -> i64 {
    let quantity = i64::from(transaction.quantity);
    match transaction.transaction_type {
        TransactionType::Purchase => quantity,
        _ => -quantity,
    }
}

/// Format a timestamp as a trend label
pub fn trend_label(at: DateTime<Utc>) -> String {
    at.format(TREND_LABEL_FORMAT).to_string()
}

/// Build the stock movement series.
///
/// `transactions` must already be ascending by `created_at`; they are not
/// re-sorted. At most `limit` points are returned, taken from the end of the
/// input (the most recent ones).
pub fn trend<T: AsRef<Transaction>>(transactions: &[T], limit: usize) -> Vec<TrendPoint> {
    let skip = transactions.len().saturating_sub(limit);

    transactions[skip..]
        .iter()
        .map(|t| {
            let t = t.as_ref();
            TrendPoint {
                label: trend_label(t.created_at),
                value: signed_quantity(t),
            }
        })
        .collect()
}

/// Sum ascending transactions per day into sales, purchases and damages.
///
/// Days appear in order of first occurrence. Transfers are not counted in
/// any column, but still open their day.
pub fn daily_movements<T: AsRef<Transaction>>(transactions: &[T]) -> Vec<DailyMovement> {
    let mut days: Vec<DailyMovement> = Vec::new();

    for t in transactions {
        let t = t.as_ref();
        let date = t.created_at.format(DAY_LABEL_FORMAT).to_string();

        let index = match days.iter().position(|d| d.date == date) {
            Some(index) => index,
            None => {
                days.push(DailyMovement {
                    date,
                    ..Default::default()
                });
                days.len() - 1
            }
        };

        let day = &mut days[index];
        let quantity = i64::from(t.quantity);
        match t.transaction_type {
            TransactionType::Sale => day.sales += quantity,
            TransactionType::Purchase => day.purchases += quantity,
            TransactionType::Damage => day.damages += quantity,
            TransactionType::TransferIn | TransactionType::TransferOut => {}
        }
    }

    days
}

/// A CSV column: its header and how to render a row's value
pub struct ColumnSpec<R> {
    pub header: String,
    extract: Box<dyn Fn(&R) -> String>,
}

impl<R> ColumnSpec<R> {
    pub fn new(header: impl Into<String>, extract: impl Fn(&R) -> String + 'static) -> Self {
        Self {
            header: header.into(),
            extract: Box::new(extract),
        }
    }

    pub fn extract(&self, row: &R) -> String {
        (self.extract)(row)
    }
}

impl<R> std::fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Render rows as comma separated text.
///
/// The first line holds the headers, then one line per row, joined by `\n`
/// with no trailing newline. Values are not quoted or escaped, so a value
/// containing a comma or newline yields a malformed line.
pub fn export_csv<R>(rows: &[R], columns: &[ColumnSpec<R>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);

    lines.push(
        columns
            .iter()
            .map(|c| c.header.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|c| c.extract(row))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}
