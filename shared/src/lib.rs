//! Shared types and models for the Stock Ledger inventory dashboard
//!
//! This crate contains the domain models, input validation and the stock
//! ledger aggregation used by the backend and the browser (via WASM).

pub mod ledger;
pub mod models;
pub mod report;
pub mod types;
pub mod validation;

pub use ledger::*;
pub use models::*;
pub use report::*;
pub use types::*;
pub use validation::*;
