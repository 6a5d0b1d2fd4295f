//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── CoreError        - Purchase and catalog failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shelf-cli errors (app)                                                │
//! │  └── CliError         - Config/terminal failures, wraps CoreError      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → message on screen      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is raised where the rule is violated and travels up with `?`.
//! Nothing in this crate retries.

use thiserror::Error;

use crate::product::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by product purchases and store operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The store holds no product with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Not enough stock to complete the purchase.
    ///
    /// ## User Workflow
    /// ```text
    /// Order: 10 × "MacBook Air M2"
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { product: "MacBook Air M2", available: 5, requested: 10 }
    /// ```
    #[error("Not enough stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// A limited product was bought above its per-order maximum.
    #[error("Cannot purchase more than {maximum} of {product} per order (requested {requested})")]
    PurchaseLimitExceeded {
        product: String,
        maximum: i64,
        requested: i64,
    },

    /// The order's amounts do not fit in [`crate::Money`].
    #[error("Order total is too large")]
    TotalOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by constructors and purchase entry points before any state changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value may be zero but not below it.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            product: "MacBook Air M2".to_string(),
            available: 5,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for MacBook Air M2: available 5, requested 10"
        );
    }

    #[test]
    fn test_purchase_limit_message() {
        let err = CoreError::PurchaseLimitExceeded {
            product: "Shipping".to_string(),
            maximum: 1,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cannot purchase more than 1 of Shipping per order (requested 2)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");

        let err = ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
