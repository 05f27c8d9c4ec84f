//! Cart manager, coupled transactionally to the stock ledger.
//!
//! Every mutating operation takes the ledger and applies the reservation (or
//! release) and the cart change as one indivisible step: either both happen
//! or neither does. Line prices are captured at add time, so later catalog
//! price edits never retro-change an in-progress cart.

use mirai_core::{Price, Product, ProductId};
use thiserror::Error;
use uuid::Uuid;

use crate::ledger::{InsufficientStock, StockLedger};

/// Opaque identifier of a cart line, unique per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartLineId(Uuid);

impl CartLineId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product in the cart.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub id: CartLineId,
    pub product_id: ProductId,
    /// Product name captured at add time.
    pub name: String,
    /// Unit price captured at add time.
    pub unit_price: Price,
    /// Always at least 1; a line that would drop below 1 is removed instead.
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A cart mutation that was rejected; the cart and ledger are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product has no sellable units left.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },
    /// A quantity increase asked for more units than remain.
    #[error(transparent)]
    InsufficientStock(#[from] InsufficientStock),
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    /// The line now has the requested quantity.
    Updated { from: u32, to: u32 },
    /// The requested quantity was below 1; the line was removed.
    Removed,
    /// No line with that id; nothing changed.
    NotFound,
}

/// Ordered collection of cart lines.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, reserving it in the ledger.
    ///
    /// Increments an existing line for the product or opens a new one with a
    /// fresh id. Returns the id of the affected line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] if no units are available; the cart
    /// is left untouched.
    pub fn add(
        &mut self,
        product: &Product,
        ledger: &mut StockLedger,
    ) -> Result<CartLineId, CartError> {
        if ledger.available(product.id) == 0 {
            return Err(CartError::OutOfStock {
                name: product.name.clone(),
            });
        }
        ledger
            .reserve(product.id, 1)
            .map_err(|_| CartError::OutOfStock {
                name: product.name.clone(),
            })?;

        if let Some(index) = self.lines.iter().position(|l| l.product_id == product.id) {
            self.lines[index].quantity += 1;
            Ok(self.lines[index].id)
        } else {
            let line = CartLine {
                id: CartLineId::generate(),
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity: 1,
            };
            let id = line.id;
            self.lines.push(line);
            Ok(id)
        }
    }

    /// Remove a line, releasing its full quantity back to the ledger.
    ///
    /// Unknown ids are a no-op. Returns the removed line, if any.
    pub fn remove(&mut self, id: CartLineId, ledger: &mut StockLedger) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.id == id)?;
        let line = self.lines.remove(index);
        ledger.release(line.product_id, line.quantity);
        Some(line)
    }

    /// Set a line to `quantity`, reserving or releasing the difference.
    ///
    /// A quantity below 1 removes the line. The change is all-or-nothing: if
    /// the increase cannot be fully reserved, the cart and ledger stay as
    /// they were.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InsufficientStock`] when the increase exceeds the
    /// remaining availability.
    pub fn set_quantity(
        &mut self,
        id: CartLineId,
        quantity: u32,
        ledger: &mut StockLedger,
    ) -> Result<QuantityOutcome, CartError> {
        let Some(index) = self.lines.iter().position(|l| l.id == id) else {
            return Ok(QuantityOutcome::NotFound);
        };

        if quantity < 1 {
            self.remove(id, ledger);
            return Ok(QuantityOutcome::Removed);
        }

        let current = self.lines[index].quantity;
        if quantity > current {
            ledger.reserve(self.lines[index].product_id, quantity - current)?;
        } else if quantity < current {
            ledger.release(self.lines[index].product_id, current - quantity);
        }
        self.lines[index].quantity = quantity;
        Ok(QuantityOutcome::Updated {
            from: current,
            to: quantity,
        })
    }

    /// Empty the cart WITHOUT releasing reserved stock.
    ///
    /// Used on checkout completion: the sale is final and the reserved units
    /// are permanently consumed.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    #[must_use]
    pub fn find(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Look up the line holding a given product.
    #[must_use]
    pub fn find_product(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines (navbar badge).
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals at captured prices.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: &str, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            category: "Cakes".to_owned(),
            price: Price::new(price.parse().unwrap()),
            description: String::new(),
            ingredients: String::new(),
            image: String::new(),
            stock,
            show_on_home: false,
        }
    }

    fn setup(stock: u32) -> (Product, StockLedger, Cart) {
        let p = product(1, "Yuzu Matcha Cloud", "12.5", stock);
        let ledger = StockLedger::from_catalog(std::slice::from_ref(&p));
        (p, ledger, Cart::new())
    }

    #[test]
    fn test_add_reserves_and_opens_line() {
        let (p, mut ledger, mut cart) = setup(3);
        let id = cart.add(&p, &mut ledger).unwrap();
        assert_eq!(ledger.available(p.id), 2);
        let line = cart.find(id).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, p.price);
    }

    #[test]
    fn test_add_increments_existing_line() {
        let (p, mut ledger, mut cart) = setup(3);
        let first = cart.add(&p, &mut ledger).unwrap();
        let second = cart.add(&p, &mut ledger).unwrap();
        assert_eq!(first, second);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.find(first).unwrap().quantity, 2);
        assert_eq!(ledger.available(p.id), 1);
    }

    #[test]
    fn test_add_out_of_stock_changes_nothing() {
        let (p, mut ledger, mut cart) = setup(0);
        let err = cart.add(&p, &mut ledger).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                name: "Yuzu Matcha Cloud".to_owned()
            }
        );
        assert!(cart.is_empty());
        assert_eq!(ledger.available(p.id), 0);
    }

    #[test]
    fn test_exhausting_stock_then_rejecting() {
        // stock=3, add x3 -> stock 0, qty 3; 4th add rejected, stock stays 0
        let (p, mut ledger, mut cart) = setup(3);
        for _ in 0..3 {
            cart.add(&p, &mut ledger).unwrap();
        }
        assert_eq!(ledger.available(p.id), 0);
        assert_eq!(cart.total_items(), 3);

        assert!(cart.add(&p, &mut ledger).is_err());
        assert_eq!(ledger.available(p.id), 0);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_remove_releases_full_quantity() {
        let (p, mut ledger, mut cart) = setup(3);
        let id = cart.add(&p, &mut ledger).unwrap();
        cart.set_quantity(id, 3, &mut ledger).unwrap();
        assert_eq!(ledger.available(p.id), 0);

        let removed = cart.remove(id, &mut ledger).unwrap();
        assert_eq!(removed.quantity, 3);
        assert!(cart.is_empty());
        assert_eq!(ledger.available(p.id), 3);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (p, mut ledger, mut cart) = setup(3);
        cart.add(&p, &mut ledger).unwrap();
        let bogus = CartLineId::generate();
        assert!(cart.remove(bogus, &mut ledger).is_none());
        assert_eq!(cart.total_items(), 1);
        assert_eq!(ledger.available(p.id), 2);
    }

    #[test]
    fn test_set_quantity_rejects_overdraw_all_or_nothing() {
        // qty=2 with 1 remaining; asking for 5 (delta 3 > 1) changes nothing
        let (p, mut ledger, mut cart) = setup(3);
        let id = cart.add(&p, &mut ledger).unwrap();
        cart.set_quantity(id, 2, &mut ledger).unwrap();
        assert_eq!(ledger.available(p.id), 1);

        let err = cart.set_quantity(id, 5, &mut ledger).unwrap_err();
        assert!(matches!(err, CartError::InsufficientStock(_)));
        assert_eq!(cart.find(id).unwrap().quantity, 2);
        assert_eq!(ledger.available(p.id), 1);
    }

    #[test]
    fn test_set_quantity_decrease_releases() {
        let (p, mut ledger, mut cart) = setup(5);
        let id = cart.add(&p, &mut ledger).unwrap();
        cart.set_quantity(id, 4, &mut ledger).unwrap();
        let outcome = cart.set_quantity(id, 1, &mut ledger).unwrap();
        assert_eq!(outcome, QuantityOutcome::Updated { from: 4, to: 1 });
        assert_eq!(ledger.available(p.id), 4);
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        let (p, mut ledger, mut cart) = setup(3);
        let id = cart.add(&p, &mut ledger).unwrap();
        let outcome = cart.set_quantity(id, 0, &mut ledger).unwrap();
        assert_eq!(outcome, QuantityOutcome::Removed);
        assert!(cart.is_empty());
        assert_eq!(ledger.available(p.id), 3);
    }

    #[test]
    fn test_clear_consumes_reservations() {
        let (p, mut ledger, mut cart) = setup(3);
        cart.add(&p, &mut ledger).unwrap();
        cart.add(&p, &mut ledger).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        // Checkout finalizes the sale; nothing is released.
        assert_eq!(ledger.available(p.id), 1);
    }

    #[test]
    fn test_conservation_invariant() {
        // product.stock + cart quantity == original stock, for any sequence
        let (p, mut ledger, mut cart) = setup(7);
        let id = cart.add(&p, &mut ledger).unwrap();
        cart.set_quantity(id, 5, &mut ledger).unwrap();
        cart.set_quantity(id, 2, &mut ledger).unwrap();
        let _ = cart.set_quantity(id, 9, &mut ledger);
        cart.add(&p, &mut ledger).unwrap();

        let held = cart.total_items();
        assert_eq!(ledger.available(p.id) + held, 7);
    }

    #[test]
    fn test_subtotal_uses_captured_prices() {
        let (p, mut ledger, mut cart) = setup(4);
        let id = cart.add(&p, &mut ledger).unwrap();
        cart.set_quantity(id, 3, &mut ledger).unwrap();
        assert_eq!(cart.subtotal(), Price::new("37.5".parse().unwrap()));

        // A later catalog price change does not touch the captured price.
        let line = cart.find(id).unwrap();
        assert_eq!(line.unit_price, Price::new("12.5".parse().unwrap()));
    }
}
