//! Catalog input and search tests
//!
//! Validation of request bodies and the search filters behind the list
//! endpoints.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    normalize_text, validate_sku, validate_unit_price, CategoryInput, CreateProductInput,
    CreateSupplierInput, LinkProductInput, Product, ProductRef, RecordTransactionInput, Supplier,
    Transaction, TransactionType, TransactionWithProduct, UpdateProductInput, UserRole,
};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

fn bolt() -> Product {
    Product {
        id: Uuid::new_v4(),
        name: "Hex Bolt M8".to_string(),
        sku: "BOLT-M8".to_string(),
        description: Some("Zinc plated".to_string()),
        current_stock: 12,
        minimum_stock: 4,
        category_id: None,
        image_url: None,
        category: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_create_product_defaults_stock_to_zero() {
        let input: CreateProductInput =
            serde_json::from_str(r#"{"name":"Washer","sku":"W-1"}"#).unwrap();
        assert_eq!(input.current_stock, 0);
        assert_eq!(input.minimum_stock, 0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_rejects_negative_stock() {
        let input: CreateProductInput = serde_json::from_str(
            r#"{"name":"Washer","sku":"W-1","current_stock":-1,"minimum_stock":0}"#,
        )
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_product_rejects_empty_name() {
        let input: CreateProductInput =
            serde_json::from_str(r#"{"name":"","sku":"W-1"}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let existing = bolt();
        let update = UpdateProductInput {
            current_stock: Some(3),
            ..Default::default()
        };
        let updated = update.apply_to(&existing);

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.name, existing.name);
        assert_eq!(updated.sku, existing.sku);
        assert_eq!(updated.current_stock, 3);
        assert_eq!(updated.minimum_stock, 4);
        assert!(updated.is_low_stock());
    }

    #[test]
    fn test_sku_rules() {
        assert!(validate_sku("BOLT-M8_x.20").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("BOLT M8").is_err());
        assert!(validate_sku(&"X".repeat(65)).is_err());
    }

    #[test]
    fn test_transaction_input_rules() {
        let product_id = Uuid::new_v4();
        let body = format!(
            r#"{{"type":"transfer_out","product_id":"{}","quantity":0}}"#,
            product_id
        );
        let input: RecordTransactionInput = serde_json::from_str(&body).unwrap();
        assert_eq!(input.transaction_type, TransactionType::TransferOut);
        assert!(input.validate().is_err());

        assert!(validate_unit_price(Some(Decimal::from_str("-0.01").unwrap())).is_err());
        assert!(validate_unit_price(Some(Decimal::ZERO)).is_ok());
        assert!(validate_unit_price(None).is_ok());
    }

    #[test]
    fn test_unknown_transaction_type_is_rejected() {
        let body = format!(
            r#"{{"type":"refund","product_id":"{}","quantity":1}}"#,
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<RecordTransactionInput>(&body).is_err());
    }

    #[test]
    fn test_supplier_email_rule() {
        let valid = CreateSupplierInput {
            name: "Acme".to_string(),
            email: Some("orders@acme.test".to_string()),
            phone: None,
            address: None,
            notes: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateSupplierInput {
            email: Some("not-an-email".to_string()),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_supplier_blank_email_is_absent() {
        let input: CreateSupplierInput =
            serde_json::from_str(r#"{"name":"Acme","email":""}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(normalize_text(input.email), None);
    }

    #[test]
    fn test_update_product_can_clear_category() {
        let mut product = bolt();
        product.category_id = Some(Uuid::new_v4());
        let update: UpdateProductInput = serde_json::from_str(r#"{"category_id":null}"#).unwrap();
        assert_eq!(update.apply_to(&product).category_id, None);
    }

    #[test]
    fn test_link_rejects_negative_lead_time() {
        let input = LinkProductInput {
            product_id: Uuid::new_v4(),
            unit_price: None,
            lead_time_days: Some(-2),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_category_name_length() {
        let input = CategoryInput {
            name: "F".repeat(101),
            description: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_blank_notes_become_absent() {
        assert_eq!(normalize_text(Some("   ".to_string())), None);
        assert_eq!(normalize_text(Some(" ok ".to_string())), Some("ok".to_string()));
    }

    #[test]
    fn test_product_search() {
        let product = bolt();
        assert!(product.matches_search("hex"));
        assert!(product.matches_search("bolt-m8"));
        assert!(!product.matches_search("plated"));
    }

    #[test]
    fn test_supplier_search() {
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: "Acme Fasteners".to_string(),
            email: Some("sales@acme.test".to_string()),
            phone: Some("+66 2 555 0100".to_string()),
            address: Some("Bangkok".to_string()),
            notes: None,
        };
        assert!(supplier.matches_search("FASTENERS"));
        assert!(supplier.matches_search("sales@"));
        assert!(supplier.matches_search("555"));
        assert!(!supplier.matches_search("bangkok"));
    }

    #[test]
    fn test_transaction_search_covers_notes() {
        let row = TransactionWithProduct {
            transaction: Transaction {
                id: Uuid::new_v4(),
                transaction_type: TransactionType::Damage,
                product_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: None,
                notes: Some("Dropped pallet".to_string()),
                created_at: Utc.with_ymd_and_hms(2024, 3, 7, 9, 0, 0).unwrap(),
                created_by: None,
            },
            product: ProductRef {
                name: "Hex Bolt M8".to_string(),
                sku: "BOLT-M8".to_string(),
            },
        };
        assert!(row.matches_search("pallet"));
        assert!(row.matches_search("bolt"));
        assert!(!row.matches_search("nut"));
    }

    #[test]
    fn test_catalog_roles() {
        assert!(UserRole::from_str("admin").unwrap().can_manage_catalog());
        assert!(UserRole::from_str("manager").unwrap().can_manage_catalog());
        assert!(!UserRole::from_str("staff").unwrap().can_manage_catalog());
        assert!(UserRole::from_str("owner").is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// SKUs built from the allowed alphabet always pass
        #[test]
        fn prop_valid_sku_accepted(sku in "[A-Za-z0-9._-]{1,64}") {
            prop_assert!(validate_sku(&sku).is_ok());
        }

        /// Any whitespace makes a SKU invalid
        #[test]
        fn prop_sku_with_space_rejected(head in "[A-Z]{1,10}", tail in "[0-9]{1,10}") {
            let sku = format!("{} {}", head, tail);
            prop_assert!(validate_sku(&sku).is_err());
        }

        /// Search is case-insensitive over the name
        #[test]
        fn prop_search_case_insensitive(name in "[a-zA-Z]{3,20}") {
            let mut product = bolt();
            product.name = name.clone();
            prop_assert!(product.matches_search(&name.to_uppercase()));
            prop_assert!(product.matches_search(&name.to_lowercase()));
        }
    }
}
