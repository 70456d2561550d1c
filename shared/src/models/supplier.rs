//! Supplier models and product links

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{contains_ignore_case, optional_contains};

use super::Product;

/// A supplier of products
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl Supplier {
    /// Search over name, email and phone
    pub fn matches_search(&self, query: &str) -> bool {
        contains_ignore_case(&self.name, query)
            || optional_contains(self.email.as_deref(), query)
            || optional_contains(self.phone.as_deref(), query)
    }
}

/// Input for creating a supplier. Blank optional fields are stored as absent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom = "crate::validation::validate_optional_email")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Input for updating a supplier; absent fields keep their stored value and
/// blank ones clear it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSupplierInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(custom = "crate::validation::validate_optional_email")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Link between a supplier and a product it supplies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSupplier {
    pub supplier_id: Uuid,
    pub product_id: Uuid,
    pub unit_price: Option<Decimal>,
    pub lead_time_days: Option<i32>,
}

/// A product linked to a supplier, with the link terms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkedProduct {
    #[serde(flatten)]
    pub link: ProductSupplier,
    #[serde(rename = "products")]
    pub product: Product,
}

/// Input for linking a product to a supplier
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LinkProductInput {
    pub product_id: Uuid,
    pub unit_price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub lead_time_days: Option<i32>,
}
