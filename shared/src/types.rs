//! Common types used across the dashboard

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Product name and SKU embedded in transaction listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRef {
    pub name: String,
    pub sku: String,
}

/// Category summary embedded in product listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// Error returned when parsing one of the dashboard's string enums
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseEnumError {
    #[error("unknown transaction type: {0}")]
    TransactionType(String),

    #[error("unknown report range: {0}")]
    ReportRange(String),

    #[error("unknown user role: {0}")]
    UserRole(String),
}

/// Deserialize a field where an explicit `null` differs from an absent one.
///
/// Pair with `#[serde(default)]`: absent stays `None`, `null` becomes
/// `Some(None)`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Case-insensitive substring match used by the list search boxes
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Match an optional field against a search query; absent fields never match
pub fn optional_contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| contains_ignore_case(h, needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Blue Widget", "widget"));
        assert!(contains_ignore_case("Blue Widget", ""));
        assert!(!contains_ignore_case("Blue Widget", "gadget"));
    }

    #[test]
    fn test_optional_contains_absent_field() {
        assert!(!optional_contains(None, ""));
        assert!(optional_contains(Some("net 30"), "NET"));
    }
}
