//! Validation utilities for catalog and transaction input
//!
//! Field-level rules (lengths, ranges, e-mail format) are derived with
//! `validator` on the input structs; the rules here cover what the derive
//! cannot express.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Maximum SKU length
pub const MAX_SKU_LENGTH: usize = 64;

/// Validate SKU format (1-64 chars: ASCII letters, digits, '-', '_', '.')
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.is_empty() {
        return Err("SKU is required");
    }
    if sku.len() > MAX_SKU_LENGTH {
        return Err("SKU must be at most 64 characters");
    }
    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err("SKU may only contain letters, digits, '-', '_' and '.'");
    }
    Ok(())
}

/// Validate an optional unit price is not negative
pub fn validate_unit_price(unit_price: Option<Decimal>) -> Result<(), &'static str> {
    match unit_price {
        Some(price) if price < Decimal::ZERO => Err("Unit price cannot be negative"),
        _ => Ok(()),
    }
}

/// Validate an e-mail field where a blank value means "no e-mail"
pub fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || validator::validate_email(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Trim optional free text, turning blank values into `None`
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
