//! Stock table and reservation evaluation.

use std::collections::{BTreeMap, HashMap};

use common::{LineItem, Sku};
use parking_lot::Mutex;

use crate::error::ReservationError;

/// SKU that every reservation rejects, whatever the stock table says.
pub const OUT_OF_STOCK_SKU: &str = "OUT-OF-STOCK";

/// Stock the service starts with when nothing else is configured.
pub const DEFAULT_STOCK: &[(&str, u32)] = &[("SKU123", 10), ("SKU456", 5)];

/// Remaining quantity per SKU.
///
/// The set of SKUs is fixed at construction. Each SKU has its own lock so the
/// check and the decrement for one SKU happen as a single step, while
/// reservations touching different SKUs proceed independently.
#[derive(Debug, Default)]
pub struct StockTable {
    slots: HashMap<Sku, Mutex<u32>>,
}

impl StockTable {
    /// Creates a table from `(sku, quantity)` pairs. Later duplicates win.
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<Sku>,
    {
        Self {
            slots: levels
                .into_iter()
                .map(|(sku, qty)| (sku.into(), Mutex::new(qty)))
                .collect(),
        }
    }

    /// Creates a table holding [`DEFAULT_STOCK`].
    pub fn seeded() -> Self {
        Self::new(DEFAULT_STOCK.iter().copied())
    }

    /// Returns the recorded quantity for a SKU, if the SKU is stocked at all.
    pub fn available(&self, sku: &str) -> Option<u32> {
        self.slots.get(sku).map(|slot| *slot.lock())
    }

    /// Returns every SKU with its current quantity, ordered by SKU.
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.slots
            .iter()
            .map(|(sku, slot)| (sku.to_string(), *slot.lock()))
            .collect()
    }

    /// Reserves every item in order, stopping at the first one that cannot be
    /// satisfied.
    ///
    /// Items are decremented as they pass, so when a later item fails the
    /// earlier ones stay reserved. Nothing is rolled back.
    pub fn reserve(&self, items: &[LineItem]) -> Result<(), ReservationError> {
        items.iter().try_for_each(|item| self.reserve_one(item))
    }

    fn reserve_one(&self, item: &LineItem) -> Result<(), ReservationError> {
        let out_of_stock = || ReservationError::OutOfStock {
            sku: item.sku.clone(),
        };

        if item.sku.as_str() == OUT_OF_STOCK_SKU {
            return Err(out_of_stock());
        }

        let slot = self.slots.get(item.sku.as_str()).ok_or_else(out_of_stock)?;
        let mut remaining = slot.lock();

        // An exhausted SKU counts as unstocked even for a zero-quantity request.
        if *remaining == 0 || *remaining < item.quantity {
            return Err(out_of_stock());
        }

        *remaining -= item.quantity;
        Ok(())
    }
}

impl<S: Into<Sku>> FromIterator<(S, u32)> for StockTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StockTable {
        StockTable::new([("SKU123", 10), ("SKU456", 5)])
    }

    #[test]
    fn test_reserve_decrements_each_item() {
        let stock = table();
        let items = vec![LineItem::new("SKU123", 2), LineItem::new("SKU456", 5)];

        stock.reserve(&items).unwrap();

        assert_eq!(stock.available("SKU123"), Some(8));
        assert_eq!(stock.available("SKU456"), Some(0));
    }

    #[test]
    fn test_sentinel_sku_always_rejected() {
        let stock = StockTable::new([(OUT_OF_STOCK_SKU, 1_000), ("SKU123", 10)]);
        let err = stock
            .reserve(&[LineItem::new(OUT_OF_STOCK_SKU, 1)])
            .unwrap_err();

        assert_eq!(err.sku().as_str(), OUT_OF_STOCK_SKU);
        assert_eq!(err.to_string(), "Item OUT-OF-STOCK out of stock");
        assert_eq!(stock.available(OUT_OF_STOCK_SKU), Some(1_000));
    }

    #[test]
    fn test_unknown_sku_rejected() {
        let stock = table();
        let err = stock.reserve(&[LineItem::new("NOPE", 1)]).unwrap_err();
        assert_eq!(err.to_string(), "Item NOPE out of stock");
    }

    #[test]
    fn test_quantity_above_stock_rejected_without_change() {
        let stock = table();
        let err = stock.reserve(&[LineItem::new("SKU456", 6)]).unwrap_err();

        assert_eq!(err.sku().as_str(), "SKU456");
        assert_eq!(stock.available("SKU456"), Some(5));
    }

    #[test]
    fn test_exact_remaining_quantity_succeeds() {
        let stock = table();
        stock.reserve(&[LineItem::new("SKU456", 5)]).unwrap();
        assert_eq!(stock.available("SKU456"), Some(0));
    }

    #[test]
    fn test_exhausted_sku_rejected() {
        let stock = StockTable::new([("SKU123", 0)]);
        assert!(stock.reserve(&[LineItem::new("SKU123", 0)]).is_err());
    }

    #[test]
    fn test_earlier_items_stay_decremented_when_later_item_fails() {
        let stock = table();
        let items = vec![
            LineItem::new("SKU123", 1),
            LineItem::new(OUT_OF_STOCK_SKU, 1),
            LineItem::new("SKU456", 1),
        ];

        let err = stock.reserve(&items).unwrap_err();

        assert_eq!(err.sku().as_str(), OUT_OF_STOCK_SKU);
        assert_eq!(stock.available("SKU123"), Some(9));
        // Evaluation stopped before the third item.
        assert_eq!(stock.available("SKU456"), Some(5));
    }

    #[test]
    fn test_first_failing_item_is_reported() {
        let stock = table();
        let items = vec![LineItem::new("MISSING", 1), LineItem::new(OUT_OF_STOCK_SKU, 1)];
        let err = stock.reserve(&items).unwrap_err();
        assert_eq!(err.sku().as_str(), "MISSING");
    }

    #[test]
    fn test_repeated_sku_in_one_batch_is_checked_against_running_total() {
        let stock = table();
        let items = vec![LineItem::new("SKU456", 3), LineItem::new("SKU456", 3)];

        assert!(stock.reserve(&items).is_err());
        assert_eq!(stock.available("SKU456"), Some(2));
    }

    #[test]
    fn test_empty_batch_succeeds() {
        let stock = table();
        stock.reserve(&[]).unwrap();
        assert_eq!(stock.snapshot().get("SKU123"), Some(&10));
    }

    #[test]
    fn test_seeded_table() {
        let stock = StockTable::seeded();
        assert_eq!(stock.available("SKU123"), Some(10));
        assert_eq!(stock.available("SKU456"), Some(5));
        assert_eq!(stock.available(OUT_OF_STOCK_SKU), None);
    }

    #[test]
    fn test_concurrent_reservations_never_oversell() {
        let stock = StockTable::new([("SKU123", 100)]);
        let successes = std::sync::atomic::AtomicU32::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        if stock.reserve(&[LineItem::new("SKU123", 1)]).is_ok() {
                            successes.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(successes.into_inner(), 100);
        assert_eq!(stock.available("SKU123"), Some(0));
    }
}
