//! Stock ledger: remaining sellable units per product.
//!
//! The ledger is the only place stock moves. Cart operations reserve and
//! release through it, and the controller copies the resulting availability
//! back onto the displayed product record, which keeps every display path
//! reading a single source of truth.

use std::collections::HashMap;

use mirai_core::{Product, ProductId};
use thiserror::Error;

/// A reservation was requested for more units than remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not enough stock for product {product_id}: requested {requested}, available {available}")]
pub struct InsufficientStock {
    pub product_id: ProductId,
    pub requested: u32,
    pub available: u32,
}

#[derive(Debug, Clone, Copy)]
struct StockEntry {
    available: u32,
    /// Catalog maximum from the last known product record; releases clamp
    /// here so a double-release can never mint stock.
    cap: u32,
}

/// In-memory map of product id to available quantity.
///
/// Mutated only through [`reserve`](Self::reserve) and
/// [`release`](Self::release); re-baselined when the catalog is replaced or
/// a product is edited.
#[derive(Debug, Default)]
pub struct StockLedger {
    entries: HashMap<ProductId, StockEntry>,
}

impl StockLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the ledger from a full catalog, discarding prior entries.
    #[must_use]
    pub fn from_catalog(products: &[Product]) -> Self {
        let mut ledger = Self::new();
        for product in products {
            ledger.set_entry(product.id, product.stock);
        }
        ledger
    }

    /// Baseline a product at `stock` available units (new product, admin
    /// stock edit, or catalog sync). Resets the release cap as well.
    pub fn set_entry(&mut self, product_id: ProductId, stock: u32) {
        self.entries.insert(
            product_id,
            StockEntry {
                available: stock,
                cap: stock,
            },
        );
    }

    /// Forget a product (admin delete).
    pub fn remove(&mut self, product_id: ProductId) {
        self.entries.remove(&product_id);
    }

    /// Remaining sellable units; zero for unknown products.
    #[must_use]
    pub fn available(&self, product_id: ProductId) -> u32 {
        self.entries.get(&product_id).map_or(0, |e| e.available)
    }

    /// Reserve `amount` units.
    ///
    /// Succeeds only if the full amount is available, decrementing stock and
    /// returning the new availability. On failure nothing changes and the
    /// caller must leave the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientStock`] if fewer than `amount` units remain.
    pub fn reserve(
        &mut self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<u32, InsufficientStock> {
        let available = self.available(product_id);
        if available < amount {
            return Err(InsufficientStock {
                product_id,
                requested: amount,
                available,
            });
        }
        // Entry must exist: available >= amount and unknown products report 0.
        if let Some(entry) = self.entries.get_mut(&product_id) {
            entry.available -= amount;
            Ok(entry.available)
        } else {
            Err(InsufficientStock {
                product_id,
                requested: amount,
                available: 0,
            })
        }
    }

    /// Release `amount` units back, clamped to the catalog cap.
    ///
    /// Releasing an unknown product is a logged no-op rather than minting an
    /// entry; returns the resulting availability.
    pub fn release(&mut self, product_id: ProductId, amount: u32) -> u32 {
        match self.entries.get_mut(&product_id) {
            Some(entry) => {
                entry.available = entry.available.saturating_add(amount).min(entry.cap);
                entry.available
            }
            None => {
                tracing::warn!(%product_id, amount, "release for untracked product ignored");
                0
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TART: ProductId = ProductId::new(1);

    fn ledger_with(stock: u32) -> StockLedger {
        let mut ledger = StockLedger::new();
        ledger.set_entry(TART, stock);
        ledger
    }

    #[test]
    fn test_reserve_decrements() {
        let mut ledger = ledger_with(3);
        assert_eq!(ledger.reserve(TART, 2).unwrap(), 1);
        assert_eq!(ledger.available(TART), 1);
    }

    #[test]
    fn test_reserve_insufficient_leaves_stock_untouched() {
        let mut ledger = ledger_with(1);
        let err = ledger.reserve(TART, 2).unwrap_err();
        assert_eq!(
            err,
            InsufficientStock {
                product_id: TART,
                requested: 2,
                available: 1,
            }
        );
        assert_eq!(ledger.available(TART), 1);
    }

    #[test]
    fn test_reserve_unknown_product() {
        let mut ledger = StockLedger::new();
        assert!(ledger.reserve(TART, 1).is_err());
    }

    #[test]
    fn test_release_clamps_to_cap() {
        let mut ledger = ledger_with(3);
        ledger.reserve(TART, 2).unwrap();
        assert_eq!(ledger.release(TART, 2), 3);
        // Double-release cannot exceed the catalog maximum.
        assert_eq!(ledger.release(TART, 2), 3);
    }

    #[test]
    fn test_release_unknown_product_is_noop() {
        let mut ledger = StockLedger::new();
        assert_eq!(ledger.release(TART, 5), 0);
        assert_eq!(ledger.available(TART), 0);
    }

    #[test]
    fn test_set_entry_rebaselines_cap() {
        let mut ledger = ledger_with(3);
        ledger.reserve(TART, 3).unwrap();
        ledger.set_entry(TART, 10);
        assert_eq!(ledger.available(TART), 10);
        assert_eq!(ledger.release(TART, 5), 10);
    }
}
