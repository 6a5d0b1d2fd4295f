//! # Store
//!
//! The store owns the product catalog and executes multi-item orders.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Store::order([(id₁, q₁), (id₂, q₂), ...])                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  for each line:  lookup id ──► Product::buy(q) ──► ReceiptLine          │
//! │        │                             │                                  │
//! │        │                             └── Err ──► stop, apply policy     │
//! │        ▼                                                                │
//! │  Receipt { lines, total }                                               │
//! │                                                                         │
//! │  OrderPolicy::BestEffort   - lines bought before the failure stay       │
//! │                              bought (default)                           │
//! │  OrderPolicy::AllOrNothing - catalog restored to its pre-order state    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::product::{Product, ProductId};
use crate::receipt::{Receipt, ReceiptLine};

// =============================================================================
// Order Policy
// =============================================================================

/// What happens to earlier lines when a later line of an order fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Earlier purchases stay applied; the error is returned.
    #[default]
    BestEffort,
    /// Stock is restored to what it was before the order started.
    AllOrNothing,
}

impl fmt::Display for OrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderPolicy::BestEffort => write!(f, "best_effort"),
            OrderPolicy::AllOrNothing => write!(f, "all_or_nothing"),
        }
    }
}

impl FromStr for OrderPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "best_effort" => Ok(OrderPolicy::BestEffort),
            "all_or_nothing" | "atomic" => Ok(OrderPolicy::AllOrNothing),
            _ => Err(ValidationError::NotAllowed {
                field: "order policy".to_string(),
                allowed: vec!["best_effort".to_string(), "all_or_nothing".to_string()],
            }),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// A collection of products, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
    policy: OrderPolicy,
}

impl Store {
    /// Creates a store that owns the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Store {
            products,
            policy: OrderPolicy::default(),
        }
    }

    /// Builder-style policy selection.
    pub fn with_policy(mut self, policy: OrderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: OrderPolicy) {
        self.policy = policy;
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Adds a product and returns its id.
    pub fn add_product(&mut self, product: Product) -> ProductId {
        let id = product.id();
        debug!(product_id = %id, name = %product.name(), "Product added to store");
        self.products.push(product);
        id
    }

    /// Removes a product by identity and hands it back.
    ///
    /// ## Errors
    /// `ProductNotFound` if the store does not hold it.
    pub fn remove_product(&mut self, id: ProductId) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(CoreError::ProductNotFound(id))?;

        let product = self.products.remove(index);
        debug!(product_id = %id, name = %product.name(), "Product removed from store");
        Ok(product)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Mutable access, e.g. to attach a promotion.
    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    /// First product with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// Every product, including unavailable ones.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sum of stock over every product, available or not.
    pub fn total_quantity(&self) -> i64 {
        self.products.iter().map(Product::quantity).sum()
    }

    /// Products that can currently be sold, in store order.
    pub fn all_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Buys every `(product, quantity)` line and returns the total charged.
    pub fn order(&mut self, shopping_list: &[(ProductId, i64)]) -> CoreResult<Money> {
        self.place_order(shopping_list).map(|receipt| receipt.total)
    }

    /// Like [`Store::order`], returning the full receipt.
    ///
    /// ## Errors
    /// The first failing line's error, or `TotalOverflow` when every line
    /// was bought but the order total does not fit. What happened to the
    /// lines already bought depends on the store's [`OrderPolicy`].
    pub fn place_order(&mut self, shopping_list: &[(ProductId, i64)]) -> CoreResult<Receipt> {
        let snapshot = match self.policy {
            OrderPolicy::AllOrNothing => Some(self.products.clone()),
            OrderPolicy::BestEffort => None,
        };

        match self.buy_lines(shopping_list).and_then(Receipt::new) {
            Ok(receipt) => {
                info!(
                    receipt_id = %receipt.id,
                    lines = receipt.lines.len(),
                    total = %receipt.total,
                    "Order placed"
                );
                Ok(receipt)
            }
            Err(err) => {
                if let Some(products) = snapshot {
                    self.products = products;
                    warn!(error = %err, "Order failed, stock restored");
                } else {
                    warn!(error = %err, "Order failed, earlier lines kept");
                }
                Err(err)
            }
        }
    }

    fn buy_lines(&mut self, shopping_list: &[(ProductId, i64)]) -> CoreResult<Vec<ReceiptLine>> {
        let mut lines = Vec::with_capacity(shopping_list.len());

        for &(id, quantity) in shopping_list {
            let product = self
                .product_mut(id)
                .ok_or(CoreError::ProductNotFound(id))?;

            let line_total = product.buy(quantity)?;

            lines.push(ReceiptLine {
                product_id: id,
                name_snapshot: product.name().to_string(),
                unit_price: product.price(),
                quantity,
                promotion: product.applied_promotion().map(|p| p.name().to_string()),
                line_total,
            });
        }

        Ok(lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
