//! HTTP request handlers

pub mod category;
pub mod dashboard;
pub mod health;
pub mod product;
pub mod reporting;
pub mod supplier;
pub mod transaction;

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};

pub use category::*;
pub use dashboard::*;
pub use health::*;
pub use product::*;
pub use reporting::*;
pub use supplier::*;
pub use transaction::*;

/// CSV body served as a file download
pub fn csv_attachment(file_name: &str, body: String) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name)) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    (headers, body)
}
