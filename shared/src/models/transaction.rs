//! Stock transaction models

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{contains_ignore_case, optional_contains, ParseEnumError, ProductRef};

/// Types of stock transactions
///
/// The quantity of a transaction is always positive; the type carries the
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "transaction_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Purchase,
    Sale,
    Damage,
    TransferIn,
    TransferOut,
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::Purchase,
        TransactionType::Sale,
        TransactionType::Damage,
        TransactionType::TransferIn,
        TransactionType::TransferOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "purchase",
            TransactionType::Sale => "sale",
            TransactionType::Damage => "damage",
            TransactionType::TransferIn => "transfer_in",
            TransactionType::TransferOut => "transfer_out",
        }
    }

    /// Whether stock physically enters the warehouse.
    ///
    /// Only used for presentation; the trend series counts every
    /// non-purchase type as outgoing.
    pub fn is_inbound(&self) -> bool {
        matches!(self, TransactionType::Purchase | TransactionType::TransferIn)
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Purchase => write!(f, "Purchase"),
            TransactionType::Sale => write!(f, "Sale"),
            TransactionType::Damage => write!(f, "Damage"),
            TransactionType::TransferIn => write!(f, "Transfer In"),
            TransactionType::TransferOut => write!(f, "Transfer Out"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::TransactionType(s.to_string()))
    }
}

/// A recorded stock transaction. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<Uuid>,
}

impl AsRef<Transaction> for Transaction {
    fn as_ref(&self) -> &Transaction {
        self
    }
}

/// A transaction together with the name and SKU of its product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionWithProduct {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(rename = "products")]
    pub product: ProductRef,
}

impl AsRef<Transaction> for TransactionWithProduct {
    fn as_ref(&self) -> &Transaction {
        &self.transaction
    }
}

impl TransactionWithProduct {
    /// Search over product name, SKU and notes
    pub fn matches_search(&self, query: &str) -> bool {
        contains_ignore_case(&self.product.name, query)
            || contains_ignore_case(&self.product.sku, query)
            || optional_contains(self.transaction.notes.as_deref(), query)
    }
}

/// Input for recording a transaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordTransactionInput {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_round_trips_through_str() {
        for t in TransactionType::ALL {
            assert_eq!(t.as_str().parse::<TransactionType>(), Ok(t));
        }
        assert_eq!(
            "refund".parse::<TransactionType>(),
            Err(ParseEnumError::TransactionType("refund".to_string()))
        );
    }

    #[test]
    fn test_transaction_type_labels() {
        assert_eq!(TransactionType::TransferIn.to_string(), "Transfer In");
        assert_eq!(TransactionType::TransferOut.to_string(), "Transfer Out");
        assert_eq!(TransactionType::Damage.to_string(), "Damage");
    }

    #[test]
    fn test_inbound_types() {
        assert!(TransactionType::Purchase.is_inbound());
        assert!(TransactionType::TransferIn.is_inbound());
        assert!(!TransactionType::Sale.is_inbound());
        assert!(!TransactionType::Damage.is_inbound());
        assert!(!TransactionType::TransferOut.is_inbound());
    }

    #[test]
    fn test_transaction_serializes_type_key() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "type": "transfer_out",
            "product_id": Uuid::nil(),
            "quantity": 3,
            "unit_price": null,
            "notes": null,
            "created_at": "2024-03-07T10:00:00Z",
            "products": { "name": "Widget", "sku": "W1" }
        });
        let tx: TransactionWithProduct = serde_json::from_value(json).unwrap();
        assert_eq!(tx.transaction.transaction_type, TransactionType::TransferOut);
        assert_eq!(tx.transaction.created_by, None);
        assert_eq!(tx.product.sku, "W1");
    }

    #[test]
    fn test_record_input_requires_positive_quantity() {
        let input = RecordTransactionInput {
            transaction_type: TransactionType::Sale,
            product_id: Uuid::new_v4(),
            quantity: 0,
            unit_price: None,
            notes: None,
        };
        assert!(input.validate().is_err());
    }
}
