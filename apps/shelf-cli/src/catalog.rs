//! Builds the in-memory [`Store`] from an [`AppConfig`].
//!
//! Promotions are built once and shared between the products that name them.

use std::collections::HashMap;
use std::sync::Arc;

use shelf_core::{Money, Product, Promotion, Store};
use tracing::{debug, info};

use crate::config::{AppConfig, ProductConfig, PromotionConfig};
use crate::error::{CliError, CliResult};

/// Turns the configured catalog into a store, in file order.
pub fn build_store(config: &AppConfig) -> CliResult<Store> {
    let mut promotions: HashMap<String, Arc<Promotion>> = HashMap::new();
    for entry in &config.promotions {
        let promotion = build_promotion(entry)?;
        debug!(promotion = %promotion.name(), "Registered promotion");
        promotions.insert(promotion.name().to_string(), Arc::new(promotion));
    }

    let mut store = Store::default().with_policy(config.store.order_policy);
    for entry in &config.products {
        let mut product = build_product(entry)?;

        if let Some(wanted) = entry.promotion() {
            let promotion = promotions.get(wanted).ok_or_else(|| {
                CliError::InvalidConfig(format!(
                    "product '{}' refers to unknown promotion '{}'",
                    entry.name(),
                    wanted
                ))
            })?;
            product.set_promotion(Some(Arc::clone(promotion)));
        }

        store.add_product(product);
    }

    info!(
        store = %config.store.name,
        products = store.len(),
        promotions = promotions.len(),
        policy = %store.policy(),
        "Catalog loaded"
    );

    Ok(store)
}

fn build_promotion(entry: &PromotionConfig) -> CliResult<Promotion> {
    let promotion = match entry {
        PromotionConfig::PercentDiscount { name, percent } => {
            Promotion::percent_discount(name.as_str(), *percent)?
        }
        PromotionConfig::SecondHalfPrice { name } => Promotion::second_half_price(name.as_str())?,
        PromotionConfig::ThirdOneFree { name } => Promotion::third_one_free(name.as_str())?,
    };
    Ok(promotion)
}

fn build_product(entry: &ProductConfig) -> CliResult<Product> {
    let product = match entry {
        ProductConfig::Stocked {
            name,
            price_cents,
            quantity,
            ..
        } => Product::new(name.as_str(), Money::from_cents(*price_cents), *quantity)?,
        ProductConfig::NonStocked {
            name, price_cents, ..
        } => Product::non_stocked(name.as_str(), Money::from_cents(*price_cents))?,
        ProductConfig::Limited {
            name,
            price_cents,
            quantity,
            maximum,
            ..
        } => Product::limited(
            name.as_str(),
            Money::from_cents(*price_cents),
            *quantity,
            *maximum,
        )?,
    };
    Ok(product)
}
