//! # Interactive Menu
//!
//! Line-oriented front-end over a [`Store`].
//!
//! ## Menu Flow
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  1. List all products in store           │──► numbered active products
//! │  2. Show total amount in store           │──► "Total of N items in store"
//! │  3. Make an order                        │──► number/amount pairs until
//! │  4. Quit                                 │    an empty line, then order
//! └──────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so tests can drive the loop with a
//! `Cursor` and capture what was printed.

use std::io::{BufRead, Write};

use shelf_core::{ProductId, Store};
use tracing::debug;

use crate::error::CliResult;

pub struct Menu<'a, R, W> {
    store: &'a mut Store,
    store_name: String,
    input: R,
    output: W,
    json: bool,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut Store, store_name: impl Into<String>, input: R, output: W) -> Self {
        Menu {
            store,
            store_name: store_name.into(),
            input,
            output,
            json: false,
        }
    }

    /// Print receipts as JSON instead of a one-line total.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "Welcome to {}!", self.store_name)?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            debug!(choice = %choice, "Menu choice");

            match choice.as_str() {
                "1" => {
                    self.list_products()?;
                }
                "2" => self.show_total()?,
                "3" => self.make_order()?,
                "4" => break,
                _ => writeln!(self.output, "Error with your choice! Try again!")?,
            }
        }

        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    fn print_menu(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "   Store Menu")?;
        writeln!(self.output, "   ----------")?;
        writeln!(self.output, "1. List all products in store")?;
        writeln!(self.output, "2. Show total amount in store")?;
        writeln!(self.output, "3. Make an order")?;
        writeln!(self.output, "4. Quit")?;
        write!(self.output, "Please choose a number: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Prints the active products and returns their ids in display order.
    fn list_products(&mut self) -> CliResult<Vec<ProductId>> {
        let products = self.store.all_products();
        writeln!(self.output, "------")?;
        for (index, product) in products.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, product.show())?;
        }
        writeln!(self.output, "------")?;
        Ok(products.iter().map(|p| p.id()).collect())
    }

    fn show_total(&mut self) -> CliResult<()> {
        writeln!(
            self.output,
            "Total of {} items in store",
            self.store.total_quantity()
        )?;
        Ok(())
    }

    fn make_order(&mut self) -> CliResult<()> {
        let listed = self.list_products()?;
        let mut shopping_list: Vec<(ProductId, i64)> = Vec::new();

        loop {
            writeln!(self.output, "When you want to finish order, enter empty text.")?;
            write!(self.output, "Which product # do you want? ")?;
            self.output.flush()?;

            let number = match self.read_line()? {
                Some(line) if !line.is_empty() => line,
                _ => break,
            };

            let Some(id) = number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| listed.get(index).copied())
            else {
                writeln!(self.output, "Error adding product!")?;
                continue;
            };

            write!(self.output, "What amount do you want? ")?;
            self.output.flush()?;
            let amount = self.read_line()?.unwrap_or_default();
            let Ok(amount) = amount.parse::<i64>() else {
                writeln!(self.output, "Error adding product!")?;
                continue;
            };

            shopping_list.push((id, amount));
            writeln!(self.output, "Product added to list!")?;
        }

        if shopping_list.is_empty() {
            writeln!(self.output, "No products ordered.")?;
            return Ok(());
        }

        match self.store.place_order(&shopping_list) {
            Ok(receipt) if self.json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&receipt)?)?;
            }
            Ok(receipt) => {
                writeln!(self.output, "********")?;
                writeln!(self.output, "Order made! Total payment: {}", receipt.total)?;
                if receipt.total_savings().is_positive() {
                    writeln!(self.output, "You saved {}", receipt.total_savings())?;
                }
            }
            Err(err) => writeln!(self.output, "Error while making order! {}", err)?,
        }

        Ok(())
    }

    /// Reads one trimmed line; `None` at end of input.
    fn read_line(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_store;
    use crate::config::AppConfig;
    use std::io::Cursor;

    fn run_menu(store: &mut Store, input: &str, json: bool) -> String {
        let mut output = Vec::new();
        Menu::new(store, "Best Buy", Cursor::new(input.to_string()), &mut output)
            .with_json(json)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn demo_store() -> Store {
        build_store(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_list_products() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "1\n4\n", false);

        assert!(out.contains("Welcome to Best Buy!"));
        assert!(out.contains(
            "1. MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: Second Half price!"
        ));
        assert!(out.contains("4. Windows License, Price: $125.00, Quantity: Unlimited"));
        assert!(out.contains("5. Shipping, Price: $10.00, Quantity: 250, Max 1 per order"));
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_show_total() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "2\n4\n", false);
        assert!(out.contains("Total of 1100 items in store"));
    }

    #[test]
    fn test_order_updates_stock() {
        let mut store = demo_store();
        // two MacBooks (second half price) and one Pixel
        let out = run_menu(&mut store, "3\n1\n2\n3\n1\n\n2\n4\n", false);

        assert!(out.contains("Product added to list!"));
        assert!(out.contains("Order made! Total payment: $2675.00"));
        assert!(out.contains("You saved $725.00"));
        assert!(out.contains("Total of 1097 items in store"));
    }

    #[test]
    fn test_order_error_is_reported() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "3\n5\n2\n\n4\n", false);

        assert!(out.contains("Error while making order! Cannot purchase more than 1 of Shipping"));
        assert_eq!(store.total_quantity(), 1100);
    }

    #[test]
    fn test_bad_product_number() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "3\n9\nabc\n\n4\n", false);

        assert_eq!(out.matches("Error adding product!").count(), 2);
        assert!(out.contains("No products ordered."));
    }

    #[test]
    fn test_bad_amount() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "3\n1\nmany\n\n4\n", false);
        assert!(out.contains("Error adding product!"));
        assert!(out.contains("No products ordered."));
    }

    #[test]
    fn test_oversized_amount_is_reported() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "3\n4\n1000000000000000\n\n1\n4\n", false);

        assert!(out.contains(
            "Error while making order! Validation error: quantity must be between 1 and"
        ));
        // listed once for the order, once more after it failed
        assert_eq!(out.matches("4. Windows License").count(), 2);
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_invalid_choice() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "7\n4\n", false);
        assert!(out.contains("Error with your choice! Try again!"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "1\n", false);
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_json_receipt() {
        let mut store = demo_store();
        let out = run_menu(&mut store, "3\n3\n1\n\n4\n", true);

        let start = out.find('{').unwrap();
        let end = out.rfind('}').unwrap();
        let receipt: serde_json::Value = serde_json::from_str(&out[start..=end]).unwrap();
        assert_eq!(receipt["total"], 50_000);
        assert_eq!(receipt["lines"][0]["name_snapshot"], "Google Pixel 7");
        assert_eq!(receipt["lines"][0]["quantity"], 1);
    }
}
