//! # Products
//!
//! A product is a named, priced line in the catalog with its own stock.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ProductKind                                     │
//! │                                                                         │
//! │  Stocked              NonStocked              Limited { maximum }       │
//! │  ─────────            ──────────              ───────────────────       │
//! │  tracks quantity      quantity fixed at 0     tracks quantity           │
//! │  active while > 0     always active           active while > 0          │
//! │  promotion-aware      list price only         at most `maximum` units   │
//! │                                               per buy, then Stocked     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Availability vs. Enabled
//! Two separate facts are tracked:
//! - [`Product::is_active`] is availability and is always computed from
//!   stock (non-stocked products are always available). Store listings and
//!   ordering look at this one.
//! - [`Product::is_enabled`] is an administrative flag toggled by
//!   [`Product::activate`] / [`Product::deactivate`]. Depleting stock clears
//!   it; it never makes a product purchasable on its own.
//!
//! ## Example
//! ```rust
//! use shelf_core::money::Money;
//! use shelf_core::product::Product;
//!
//! let mut pixel = Product::new("Google Pixel 7", Money::from_dollars(500), 1).unwrap();
//! let total = pixel.buy(1).unwrap();
//! assert_eq!(total, Money::from_dollars(500));
//! assert!(!pixel.is_active());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::validation::{
    validate_decrement, validate_line_total, validate_maximum, validate_price,
    validate_product_name, validate_quantity,
};

// =============================================================================
// Product Id
// =============================================================================

/// Identity of a product inside a store. Two products with the same name
/// and price are still different products.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Creates a new random (v4) identifier.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// How a product treats stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Finite stock; sold until depleted.
    Stocked,
    /// No stock is kept (licenses, services). Always available.
    NonStocked,
    /// Finite stock with a cap on units per single purchase.
    Limited { maximum: i64 },
}

// =============================================================================
// Product
// =============================================================================

/// A product in the store catalog.
///
/// ## Invariants
/// - `name` is not blank, `price` is strictly positive
/// - `quantity` never drops below zero
/// - non-stocked products keep `quantity == 0`
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    quantity: i64,
    enabled: bool,
    promotion: Option<Arc<Promotion>>,
    kind: ProductKind,
}

impl Product {
    /// Creates a stocked product.
    ///
    /// ## Errors
    /// `Validation` if the name is blank, the price is not positive or the
    /// initial quantity is less than 1.
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> CoreResult<Self> {
        Self::build(name.into(), price, quantity, ProductKind::Stocked)
    }

    /// Creates a product that keeps no stock.
    pub fn non_stocked(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            price,
            quantity: 0,
            enabled: true,
            promotion: None,
            kind: ProductKind::NonStocked,
        })
    }

    /// Creates a stocked product that sells at most `maximum` units per buy.
    pub fn limited(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        maximum: i64,
    ) -> CoreResult<Self> {
        validate_maximum(maximum)?;
        Self::build(name.into(), price, quantity, ProductKind::Limited { maximum })
    }

    fn build(name: String, price: Money, quantity: i64, kind: ProductKind) -> CoreResult<Self> {
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_quantity(quantity)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            price,
            quantity,
            enabled: true,
            promotion: None,
            kind,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Per-order cap, for limited products.
    pub fn maximum(&self) -> Option<i64> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    /// Units currently in stock (always 0 for non-stocked products).
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Removes `delta` units from stock.
    ///
    /// This is a relative decrement, not an absolute setter. Reaching zero
    /// clears the enabled flag. Non-stocked products ignore it.
    ///
    /// ## Errors
    /// - `Validation` for a negative delta
    /// - `InsufficientStock` if stock would go below zero (stock unchanged)
    pub fn set_quantity(&mut self, delta: i64) -> CoreResult<()> {
        validate_decrement(delta)?;

        if self.kind == ProductKind::NonStocked {
            return Ok(());
        }

        if delta > self.quantity {
            return Err(CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.quantity,
                requested: delta,
            });
        }

        self.quantity -= delta;
        if self.quantity == 0 {
            debug!(product_id = %self.id, name = %self.name, "Stock depleted");
            self.enabled = false;
        }

        Ok(())
    }

    pub fn promotion(&self) -> Option<&Arc<Promotion>> {
        self.promotion.as_ref()
    }

    /// The promotion [`Product::buy`] prices with. Non-stocked products
    /// never use one, even when attached.
    pub fn applied_promotion(&self) -> Option<&Promotion> {
        match self.kind {
            ProductKind::NonStocked => None,
            ProductKind::Stocked | ProductKind::Limited { .. } => self.promotion.as_deref(),
        }
    }

    /// Attaches (`Some`) or detaches (`None`) a shared promotion.
    pub fn set_promotion(&mut self, promotion: Option<Arc<Promotion>>) {
        self.promotion = promotion;
    }

    // =========================================================================
    // Availability
    // =========================================================================

    /// Whether the product can currently be sold.
    pub fn is_active(&self) -> bool {
        match self.kind {
            ProductKind::NonStocked => true,
            ProductKind::Stocked | ProductKind::Limited { .. } => self.quantity > 0,
        }
    }

    /// Administrative flag; see the module docs for how it relates to
    /// [`Product::is_active`].
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn activate(&mut self) {
        self.enabled = true;
    }

    pub fn deactivate(&mut self) {
        self.enabled = false;
    }

    // =========================================================================
    // Display & Purchase
    // =========================================================================

    /// One-line human readable summary.
    ///
    /// ```text
    /// MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: Second Half price!
    /// Windows License, Price: $125.00, Quantity: Unlimited
    /// Shipping, Price: $10.00, Quantity: 250, Max 1 per order
    /// ```
    pub fn show(&self) -> String {
        let mut line = match self.kind {
            ProductKind::Stocked => {
                format!("{}, Price: {}, Quantity: {}", self.name, self.price, self.quantity)
            }
            ProductKind::NonStocked => {
                format!("{}, Price: {}, Quantity: Unlimited", self.name, self.price)
            }
            ProductKind::Limited { maximum } => format!(
                "{}, Price: {}, Quantity: {}, Max {} per order",
                self.name, self.price, self.quantity, maximum
            ),
        };

        if let Some(promotion) = &self.promotion {
            line.push_str(", Promotion: ");
            line.push_str(promotion.name());
        }

        line
    }

    /// Buys `quantity` units and returns the amount charged.
    ///
    /// ## Purchase Flow
    /// ```text
    /// buy(q)
    ///   │
    ///   ├── q <= 0? ─────────────────────────► Validation error
    ///   │
    ///   ├── NonStocked ──────────────────────► price × q (no stock, no promotion)
    ///   │                                      OutOfRange if it overflows
    ///   │
    ///   ├── Limited and q > maximum? ────────► PurchaseLimitExceeded
    ///   │
    ///   ├── q > stock? ──────────────────────► InsufficientStock (stock unchanged)
    ///   │
    ///   ├── total = promotion(price, q) or price × q
    ///   │
    ///   └── set_quantity(q) ─────────────────► Ok(total)
    /// ```
    pub fn buy(&mut self, quantity: i64) -> CoreResult<Money> {
        validate_quantity(quantity)?;

        match self.kind {
            ProductKind::NonStocked => {
                // Non-stocked products charge list price even when a promotion is attached.
                let total = validate_line_total(self.price, quantity)?;
                debug!(product_id = %self.id, quantity, %total, "Non-stocked purchase");
                return Ok(total);
            }
            ProductKind::Limited { maximum } if quantity > maximum => {
                return Err(CoreError::PurchaseLimitExceeded {
                    product: self.name.clone(),
                    maximum,
                    requested: quantity,
                });
            }
            ProductKind::Stocked | ProductKind::Limited { .. } => {}
        }

        if quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }

        let total = match self.applied_promotion() {
            Some(promotion) => promotion.apply_promotion(self.price, quantity)?,
            None => validate_line_total(self.price, quantity)?,
        };

        self.set_quantity(quantity)?;

        debug!(
            product_id = %self.id,
            quantity,
            %total,
            remaining = self.quantity,
            "Purchase applied"
        );

        Ok(total)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.show())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
