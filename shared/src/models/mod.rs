//! Domain models for the Stock Ledger inventory dashboard

mod category;
mod product;
mod supplier;
mod transaction;
mod user;

pub use category::*;
pub use product::*;
pub use supplier::*;
pub use transaction::*;
pub use user::*;
