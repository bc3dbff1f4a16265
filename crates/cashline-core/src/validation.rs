//! # Validation Module
//!
//! Boundary checks for order input, run before the engine.
//!
//! ## Why Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_price() adds without overflow checks and trusts its input.   │
//! │  These validators keep every line inside currency-plausible bounds:     │
//! │                                                                         │
//! │    MAX_UNIT_PRICE × MAX_ITEM_QUANTITY × MAX_LINE_ITEMS  <  u64::MAX     │
//! │                                                                         │
//! │  The engine itself never calls them.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashline_core::validation::{validate_currency, validate_quantity};
//!
//! assert!(validate_currency("USD").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::item::{Item, LineItem};
use crate::{MAX_ITEM_QUANTITY, MAX_LINE_ITEMS, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Code Validators
// =============================================================================

fn validate_code(field: &str, value: &str, len: usize) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.len() != len || !value.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must be {len} uppercase ASCII letters"),
        });
    }
    Ok(())
}

/// Validates an ISO 4217 style currency code (`USD`).
pub fn validate_currency(currency: &str) -> ValidationResult<()> {
    validate_code("currency", currency, 3)
}

/// Validates an ISO 3166-1 alpha-2 style country code (`DE`).
pub fn validate_country(country: &str) -> ValidationResult<()> {
    validate_code("country", country, 2)
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, numbers, hyphens and underscores only
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity: 1 to [`MAX_ITEM_QUANTITY`].
pub fn validate_quantity(quantity: u64) -> ValidationResult<()> {
    if quantity == 0 || quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a unit price in minor units: at most [`MAX_UNIT_PRICE`].
pub fn validate_unit_price(cents: u64) -> ValidationResult<()> {
    if cents > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE,
        });
    }
    Ok(())
}

/// Validates one line and the prices of its bundle parts.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_sku(&item.sku)?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.price.cents())?;
    for part in item.taxable_items() {
        validate_unit_price(part.price.cents())?;
    }
    Ok(())
}

/// Validates a whole list of lines.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.len() > MAX_LINE_ITEMS as usize {
        return Err(ValidationError::OutOfRange {
            field: "line_items".to_string(),
            min: 0,
            max: MAX_LINE_ITEMS,
        });
    }
    items.iter().try_for_each(validate_line_item)
}

// =============================================================================
// Unit Tests
// =============================================================================
