//! # Promotions
//!
//! Stateless pricing rules that turn a unit price and a quantity into the
//! amount charged for that line.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule               Charged for q units at price p                      │
//! │  ─────────────────  ──────────────────────────────────────────────────  │
//! │  PercentDiscount    q × p, minus percent                                │
//! │  SecondHalfPrice    ceil(q/2) × p  +  floor(q/2) × p/2                  │
//! │  ThirdOneFree       (q − floor(q/3)) × p                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A promotion never touches stock. Products hold it behind an `Arc` so one
//! configured promotion can be attached to any number of products.
//!
//! ## Example
//! ```rust
//! use shelf_core::money::Money;
//! use shelf_core::promotion::Promotion;
//!
//! let promo = Promotion::third_one_free("Third One Free!")?;
//! let total = promo.apply_promotion(Money::from_dollars(90), 9)?;
//! assert_eq!(total, Money::from_dollars(540));
//! # Ok::<(), shelf_core::ValidationError>(())
//! ```

use serde::Serialize;
use std::fmt;

use crate::money::Money;
use crate::validation::{
    validate_discount_percent, validate_line_total, validate_promotion_name, ValidationResult,
};

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage discount in basis points (3000 = 30%), always within 0-100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from a percentage, rejecting anything outside 0..=100.
    pub fn from_percentage(percent: f64) -> ValidationResult<Self> {
        validate_discount_percent(percent).map(DiscountRate)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// The arithmetic a promotion applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionRule {
    /// Every unit is discounted by the same percentage.
    PercentDiscount { rate: DiscountRate },
    /// Units are paired; the second of each pair costs half.
    SecondHalfPrice,
    /// Every third unit is free.
    ThirdOneFree,
}

/// A named pricing strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    name: String,
    rule: PromotionRule,
}

impl Promotion {
    /// Creates a percentage discount, e.g. `percent_discount("30% off!", 30.0)`.
    ///
    /// ## Errors
    /// - blank name
    /// - percent outside 0..=100 (or not a finite number)
    pub fn percent_discount(name: impl Into<String>, percent: f64) -> ValidationResult<Self> {
        let rate = DiscountRate::from_percentage(percent)?;
        Self::with_rule(name, PromotionRule::PercentDiscount { rate })
    }

    pub fn second_half_price(name: impl Into<String>) -> ValidationResult<Self> {
        Self::with_rule(name, PromotionRule::SecondHalfPrice)
    }

    pub fn third_one_free(name: impl Into<String>) -> ValidationResult<Self> {
        Self::with_rule(name, PromotionRule::ThirdOneFree)
    }

    /// Creates a promotion from an already-built rule, validating the name.
    pub fn with_rule(name: impl Into<String>, rule: PromotionRule) -> ValidationResult<Self> {
        let name = name.into();
        validate_promotion_name(&name)?;
        Ok(Promotion { name, rule })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> PromotionRule {
        self.rule
    }

    /// Total charged for `quantity` units at `unit_price`.
    ///
    /// Callers validate the quantity first; a non-positive quantity is
    /// charged nothing.
    ///
    /// ## Errors
    /// `OutOfRange` when `quantity × unit_price` does not fit in [`Money`].
    /// Every rule charges at most list price, so once list price fits the
    /// rest of the arithmetic does too.
    pub fn apply_promotion(&self, unit_price: Money, quantity: i64) -> ValidationResult<Money> {
        if quantity <= 0 {
            return Ok(Money::zero());
        }

        let list = validate_line_total(unit_price, quantity)?;

        let charged = match self.rule {
            PromotionRule::PercentDiscount { rate } => list.apply_percentage_discount(rate.bps()),
            PromotionRule::SecondHalfPrice => {
                let half_price_units = quantity / 2;
                let full_price_units = quantity - half_price_units;
                unit_price.multiply_quantity(full_price_units)
                    + unit_price.multiply_quantity(half_price_units).half()
            }
            PromotionRule::ThirdOneFree => {
                let payable = quantity - quantity / 3;
                unit_price.multiply_quantity(payable)
            }
        };

        Ok(charged)
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
