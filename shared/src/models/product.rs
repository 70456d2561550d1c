//! Product catalog models

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{contains_ignore_case, CategoryRef};

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Unique business key
    pub sku: String,
    pub description: Option<String>,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, rename = "categories", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
}

impl Product {
    /// Whether the product is at or below its minimum stock level
    pub fn is_low_stock(&self) -> bool {
        crate::ledger::is_low_stock(self.current_stock, self.minimum_stock)
    }

    /// Label shown in the stock list status column
    pub fn stock_status(&self) -> &'static str {
        if self.is_low_stock() {
            "Low Stock"
        } else {
            "In Stock"
        }
    }

    /// Search over name and SKU
    pub fn matches_search(&self, query: &str) -> bool {
        contains_ignore_case(&self.name, query) || contains_ignore_case(&self.sku, query)
    }
}

/// Input for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub current_stock: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub minimum_stock: i32,
    pub category_id: Option<Uuid>,
    pub image_url: Option<String>,
}

/// Input for updating a product; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub current_stock: Option<i32>,
    #[validate(range(min = 0))]
    pub minimum_stock: Option<i32>,
    /// `null` removes the product from its category
    #[serde(
        default,
        deserialize_with = "crate::types::deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<Option<Uuid>>,
    pub image_url: Option<String>,
}

impl UpdateProductInput {
    /// Apply the update on top of an existing product
    pub fn apply_to(self, product: &Product) -> Product {
        Product {
            id: product.id,
            name: self.name.unwrap_or_else(|| product.name.clone()),
            sku: self.sku.unwrap_or_else(|| product.sku.clone()),
            description: self.description.or_else(|| product.description.clone()),
            current_stock: self.current_stock.unwrap_or(product.current_stock),
            minimum_stock: self.minimum_stock.unwrap_or(product.minimum_stock),
            category_id: self.category_id.unwrap_or(product.category_id),
            image_url: self.image_url.or_else(|| product.image_url.clone()),
            category: None,
        }
    }
}
