//! # shelf-core: Pure Business Logic for Shelf
//!
//! Products, promotions and the store aggregate, as pure in-memory logic.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shelf-cli (menu)                             │   │
//! │  │    List ──► Total ──► Order ──► Receipt                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │─►│  product  │─►│ promotion │  │   money   │  │   │
//! │  │   │   Store   │  │  Product  │  │ Promotion │  │   Money   │  │   │
//! │  │   │  Receipt  │  │   Kind    │  │   Rule    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`promotion`] - Pricing strategies
//! - [`product`] - Products and their stock variants
//! - [`store`] - Catalog aggregate and order execution
//! - [`receipt`] - Snapshot of a completed order
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use shelf_core::{Money, Product, Promotion, Store};
//!
//! let mut macbook = Product::new("MacBook Air M2", Money::from_dollars(1450), 100)?;
//! macbook.set_promotion(Some(Arc::new(Promotion::second_half_price("Second Half price!")?)));
//! let pixel = Product::new("Google Pixel 7", Money::from_dollars(500), 250)?;
//!
//! let (macbook_id, pixel_id) = (macbook.id(), pixel.id());
//! let mut store = Store::new(vec![macbook, pixel]);
//!
//! let total = store.order(&[(macbook_id, 2), (pixel_id, 1)])?;
//! assert_eq!(total, Money::from_dollars(1450 + 725 + 500));
//! assert_eq!(store.total_quantity(), 98 + 249);
//! # Ok::<(), shelf_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod receipt;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductId, ProductKind};
pub use promotion::{DiscountRate, Promotion, PromotionRule};
pub use receipt::{Receipt, ReceiptLine};
pub use store::{OrderPolicy, Store};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product or promotion name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
