//! WebAssembly module for the Stock Ledger
//!
//! Runs the dashboard computations in the browser on rows the client has
//! already fetched. Every function takes and returns JSON strings.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    classify, daily_movements, export_csv, stock_list_columns, stock_report_columns, summarize,
    trend, Product, Supplier, Transaction,
};
use wasm_bindgen::prelude::*;

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn to_js(result: Result<String, String>) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

fn classify_json(products_json: &str) -> Result<String, String> {
    let products: Vec<Product> = parse("products", products_json)?;
    render(&classify(&products))
}

fn summarize_json(
    products_json: &str,
    suppliers_json: &str,
    transactions_json: &str,
    as_of: DateTime<Utc>,
) -> Result<String, String> {
    let products: Vec<Product> = parse("products", products_json)?;
    let suppliers: Vec<Supplier> = parse("suppliers", suppliers_json)?;
    let transactions: Vec<Transaction> = parse("transactions", transactions_json)?;
    render(&summarize(&products, &suppliers, &transactions, as_of))
}

fn trend_json(transactions_json: &str, limit: usize) -> Result<String, String> {
    let transactions: Vec<Transaction> = parse("transactions", transactions_json)?;
    render(&trend(&transactions, limit))
}

fn daily_movements_json(transactions_json: &str) -> Result<String, String> {
    let transactions: Vec<Transaction> = parse("transactions", transactions_json)?;
    render(&daily_movements(&transactions))
}

fn parse_as_of(as_of: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(as_of)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("Invalid as_of timestamp: {}", e))
}

fn now() -> Result<DateTime<Utc>, String> {
    let millis = js_sys::Date::now() as i64;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| "Clock out of range".to_string())
}

/// Attach the low-stock flag to each product
#[wasm_bindgen]
pub fn classify_products(products_json: &str) -> Result<String, JsValue> {
    to_js(classify_json(products_json))
}

/// Dashboard headline counts. An empty `as_of_rfc3339` means now.
#[wasm_bindgen]
pub fn summarize_stock(
    products_json: &str,
    suppliers_json: &str,
    transactions_json: &str,
    as_of_rfc3339: &str,
) -> Result<String, JsValue> {
    let as_of = if as_of_rfc3339.trim().is_empty() {
        now()
    } else {
        parse_as_of(as_of_rfc3339)
    };
    to_js(as_of.and_then(|as_of| {
        summarize_json(products_json, suppliers_json, transactions_json, as_of)
    }))
}

/// Stock movement chart over ascending transactions
#[wasm_bindgen]
pub fn stock_trend(transactions_json: &str, limit: usize) -> Result<String, JsValue> {
    to_js(trend_json(transactions_json, limit))
}

/// Per-day sales, purchases and damages over ascending transactions
#[wasm_bindgen]
pub fn daily_stock_movements(transactions_json: &str) -> Result<String, JsValue> {
    to_js(daily_movements_json(transactions_json))
}

/// Low-stock rule (inclusive)
#[wasm_bindgen]
pub fn is_low_stock(current: i32, minimum: i32) -> bool {
    shared::is_low_stock(current, minimum)
}

/// Quick stock report CSV
#[wasm_bindgen]
pub fn stock_report_csv(products_json: &str) -> Result<String, JsValue> {
    to_js(parse::<Vec<Product>>("products", products_json)
        .map(|products| export_csv(&products, &stock_report_columns())))
}

/// Detailed stock list CSV
#[wasm_bindgen]
pub fn detailed_stock_list_csv(products_json: &str) -> Result<String, JsValue> {
    to_js(parse::<Vec<Product>>("products", products_json)
        .map(|products| export_csv(&products, &stock_list_columns())))
}
