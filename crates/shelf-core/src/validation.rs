//! # Validation Module
//!
//! Input validation shared by the product constructors, purchases and
//! promotions.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (shelf-cli)                                        │
//! │  └── Parsing: "abc" is not a number                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Blank names, non-positive prices                                  │
//! │  └── Non-positive quantities and limits                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Product::buy                                                 │
//! │  └── Stock and per-order maximum (needs product state)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("MacBook Air M2").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank (whitespace only counts as blank)
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Google Pixel 7").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a promotion label.
pub fn validate_promotion_name(name: &str) -> ValidationResult<()> {
    validate_name("promotion name", name)
}

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Free products are not allowed.
///
/// ## Example
/// ```rust
/// use shelf_core::money::Money;
/// use shelf_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// assert!(validate_price(Money::from_cents(-1000)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity: initial stock or a purchase amount.
///
/// ## User Workflow
/// ```text
/// Customer enters amount: 0
///      │
///      ▼
/// validate_quantity(0) ← THIS FUNCTION
///      │
///      └── qty <= 0? → Error: "quantity must be positive"
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a per-order purchase limit.
pub fn validate_maximum(maximum: i64) -> ValidationResult<()> {
    if maximum <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "maximum".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock decrement. Zero is accepted and changes nothing.
pub fn validate_decrement(delta: i64) -> ValidationResult<()> {
    if delta < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Prices a line at list price, rejecting quantities whose total does not
/// fit in [`Money`].
///
/// The error carries the largest quantity that can be priced at
/// `unit_price`.
///
/// ## Example
/// ```rust
/// use shelf_core::money::Money;
/// use shelf_core::validation::validate_line_total;
///
/// let price = Money::from_dollars(125);
/// assert_eq!(validate_line_total(price, 2).unwrap(), Money::from_dollars(250));
/// assert!(validate_line_total(price, i64::MAX).is_err());
/// ```
pub fn validate_line_total(unit_price: Money, quantity: i64) -> ValidationResult<Money> {
    unit_price
        .checked_multiply_quantity(quantity)
        .ok_or_else(|| {
            let max = match unit_price.cents().unsigned_abs() {
                0 => i64::MAX,
                cents => (i64::MAX as u64 / cents) as i64,
            };
            ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max,
            }
        })
}

/// Validates a discount percentage and converts it to basis points.
///
/// ## Rules
/// - Must be a finite number between 0 and 100 inclusive
/// - Precision beyond two decimals is rounded (33.333% → 3333 bps)
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_discount_percent;
///
/// assert_eq!(validate_discount_percent(30.0).unwrap(), 3000);
/// assert!(validate_discount_percent(120.0).is_err());
/// assert!(validate_discount_percent(-5.0).is_err());
/// ```
pub fn validate_discount_percent(percent: f64) -> ValidationResult<u32> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok((percent * 100.0).round() as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("MacBook Air M2").is_ok());
        assert!(validate_product_name("  padded  ").is_ok());

        assert_eq!(
            validate_product_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_product_name(" \t ").is_err());
        assert!(validate_product_name(&"A".repeat(MAX_NAME_LENGTH + 1)).is_err());
        assert!(validate_product_name(&"A".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_promotion_name() {
        assert!(validate_promotion_name("30% off!").is_ok());
        assert!(matches!(
            validate_promotion_name(""),
            Err(ValidationError::Required { field }) if field == "promotion name"
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-1000)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_maximum() {
        assert!(validate_maximum(1).is_ok());
        assert!(validate_maximum(0).is_err());
        assert!(validate_maximum(-3).is_err());
    }

    #[test]
    fn test_validate_decrement() {
        assert!(validate_decrement(0).is_ok());
        assert!(validate_decrement(5).is_ok());
        assert_eq!(
            validate_decrement(-1),
            Err(ValidationError::MustNotBeNegative {
                field: "quantity".to_string()
            })
        );
    }

    #[test]
    fn test_validate_line_total() {
        assert_eq!(
            validate_line_total(Money::from_cents(12_500), 4),
            Ok(Money::from_cents(50_000))
        );

        let max = i64::MAX / 12_500;
        assert_eq!(
            validate_line_total(Money::from_cents(12_500), max),
            Ok(Money::from_cents(max * 12_500))
        );
        assert_eq!(
            validate_line_total(Money::from_cents(12_500), max + 1),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max,
            })
        );
    }

    #[test]
    fn test_validate_discount_percent() {
        assert_eq!(validate_discount_percent(0.0), Ok(0));
        assert_eq!(validate_discount_percent(50.0), Ok(5000));
        assert_eq!(validate_discount_percent(100.0), Ok(10000));
        assert_eq!(validate_discount_percent(33.333), Ok(3333));

        assert!(validate_discount_percent(-0.01).is_err());
        assert!(validate_discount_percent(100.5).is_err());
        assert!(validate_discount_percent(f64::NAN).is_err());
        assert!(validate_discount_percent(f64::INFINITY).is_err());
    }
}
