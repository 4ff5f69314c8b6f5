//! In-memory shopping cart.
//!
//! Lines are unique by product ID. Adding a product that is already in the
//! cart bumps that line's quantity instead of appending a second line. The
//! only mutators are crate-private so every change goes through the session
//! gate in [`crate::services::shop`].

use serde::Serialize;

use foodchain_core::{CurrencyCode, Price, ProductId, Quantity};

use super::Product;

/// A product and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    product: Product,
    quantity: Quantity,
}

impl CartLine {
    /// The product on this line.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Number of units.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.line_total(self.quantity)
    }
}

/// Ordered cart lines, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// Returns the line's quantity after the change.
    pub(crate) fn add(&mut self, product: &Product, quantity: Quantity) -> Quantity {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
        quantity
    }

    /// Drop every line.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities (the cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| u64::from(l.quantity.get()))
            .sum()
    }

    /// Sum of all line totals in `currency`.
    ///
    /// Returns `None` if any line is priced in another currency.
    #[must_use]
    pub fn subtotal(&self, currency: CurrencyCode) -> Option<Price> {
        self.lines
            .iter()
            .try_fold(Price::zero(currency), |acc, l| acc.checked_add(&l.line_total()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::product::tests::product;

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        let quantity = cart.add(&product(1, "Avocados", 1299), Quantity::ONE);
        assert_eq!(quantity.get(), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let avocados = product(1, "Avocados", 1299);
        cart.add(&avocados, qty(1));
        assert_eq!(cart.add(&avocados, qty(2)).get(), 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(avocados.id).unwrap().quantity().get(), 3);
    }

    #[test]
    fn test_distinct_products_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product(2, "Salmon", 2499), qty(1));
        cart.add(&product(1, "Avocados", 1299), qty(1));
        cart.add(&product(2, "Salmon", 2499), qty(1));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product().id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Avocados", 1299), qty(2));
        cart.add(&product(2, "Salmon", 2499), qty(1));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(CurrencyCode::USD).unwrap().to_string(), "$0.00");

        cart.add(&product(1, "Avocados", 1299), qty(2));
        cart.add(&product(3, "Tomatoes", 899), qty(1));
        assert_eq!(cart.subtotal(CurrencyCode::USD).unwrap().to_string(), "$34.97");
    }

    #[test]
    fn test_subtotal_never_relabels_currency() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Avocados", 1299), qty(1));
        assert_eq!(cart.subtotal(CurrencyCode::EUR), None);

        let mut euro = product(2, "Comté", 1850);
        euro.price = Price::from_cents(1850, CurrencyCode::EUR);
        cart.add(&euro, qty(1));
        assert_eq!(cart.subtotal(CurrencyCode::USD), None);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Avocados", 1299), qty(2));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }
}
