//! Business logic services for the stock ledger

pub mod category;
pub mod dashboard;
pub mod product;
pub mod reporting;
pub mod supplier;
pub mod transaction;

pub use category::CategoryService;
pub use dashboard::DashboardService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use supplier::SupplierService;
pub use transaction::{TransactionFilter, TransactionService};
