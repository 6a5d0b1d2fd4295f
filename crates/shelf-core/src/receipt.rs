//! # Receipts
//!
//! What a completed order looks like once it leaves the store.
//!
//! Each line freezes the product's name and unit price at the time of the
//! order (snapshot pattern), so a receipt stays correct even after the
//! product is repriced or removed from the store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::ProductId;

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    /// Product name at time of order (frozen).
    pub name_snapshot: String,
    /// Unit price at time of order (frozen).
    pub unit_price: Money,
    pub quantity: i64,
    /// Name of the promotion that priced this line, if any.
    pub promotion: Option<String>,
    /// Amount charged for this line.
    pub line_total: Money,
}

impl ReceiptLine {
    /// What the line would have cost without any promotion.
    ///
    /// Lines held by a [`Receipt`] are known to fit.
    pub fn list_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Savings from the promotion (zero when none applied).
    pub fn savings(&self) -> Money {
        self.list_total() - self.line_total
    }
}

/// A completed order.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub id: Uuid,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
    pub placed_at: DateTime<Utc>,
}

impl Receipt {
    /// Builds a receipt; the total is the sum of the line totals.
    ///
    /// ## Errors
    /// `TotalOverflow` if the charged total, the list-price total or the
    /// unit count does not fit. Past this point the receipt's own sums
    /// cannot overflow.
    pub fn new(lines: Vec<ReceiptLine>) -> CoreResult<Self> {
        let mut total = Money::zero();
        let mut list_total = Money::zero();
        let mut units: i64 = 0;

        for line in &lines {
            total = total
                .checked_add(line.line_total)
                .ok_or(CoreError::TotalOverflow)?;
            list_total = line
                .unit_price
                .checked_multiply_quantity(line.quantity)
                .and_then(|list| list_total.checked_add(list))
                .ok_or(CoreError::TotalOverflow)?;
            units = units
                .checked_add(line.quantity)
                .ok_or(CoreError::TotalOverflow)?;
        }

        Ok(Receipt {
            id: Uuid::new_v4(),
            lines,
            total,
            placed_at: Utc::now(),
        })
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total_savings(&self) -> Money {
        self.lines.iter().map(ReceiptLine::savings).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit: i64, quantity: i64, charged: i64) -> ReceiptLine {
        ReceiptLine {
            product_id: ProductId::new(),
            name_snapshot: "Item".to_string(),
            unit_price: Money::from_cents(unit),
            quantity,
            promotion: None,
            line_total: Money::from_cents(charged),
        }
    }

    #[test]
    fn test_totals() {
        let receipt = Receipt::new(vec![line(100, 3, 200), line(50, 2, 100)]).unwrap();
        assert_eq!(receipt.total, Money::from_cents(300));
        assert_eq!(receipt.item_count(), 5);
        assert_eq!(receipt.total_savings(), Money::from_cents(100));
        assert!(!receipt.is_empty());
    }

    #[test]
    fn test_empty_receipt() {
        let receipt = Receipt::new(Vec::new()).unwrap();
        assert!(receipt.total.is_zero());
        assert!(receipt.is_empty());
    }

    #[test]
    fn test_total_overflow() {
        let max = i64::MAX / 12_500;
        let big = line(12_500, max, max * 12_500);
        assert!(Receipt::new(vec![big.clone()]).is_ok());
        assert!(matches!(
            Receipt::new(vec![big.clone(), big]),
            Err(CoreError::TotalOverflow)
        ));
    }

    #[test]
    fn test_list_total_overflow() {
        // charged amount fits, list price does not
        let line = line(i64::MAX / 2, 3, 100);
        assert!(matches!(
            Receipt::new(vec![line]),
            Err(CoreError::TotalOverflow)
        ));
    }

    #[test]
    fn test_serializes_to_json() {
        let receipt = Receipt::new(vec![line(100, 1, 100)]).unwrap();
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["total"], 100);
        assert_eq!(json["lines"][0]["quantity"], 1);
        assert_eq!(json["lines"][0]["name_snapshot"], "Item");
    }
}
