//! Cart store.
//!
//! The authoritative client-side record of what the customer intends to
//! buy: one line per distinct product, quantities floored at
//! [`MIN_ORDER_QTY`] and capped at the last-known stock, every mutation
//! mirrored to the injected storage port. The store raises no errors to
//! callers; a failed save leaves the in-memory cart authoritative for the
//! session and a failed restore degrades to an empty cart.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{products::ProductSnapshot, storage::CartStorage};

/// Store-wide minimum quantity per cart line.
pub const MIN_ORDER_QTY: u32 = 3;

/// One row per distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier, unique within the cart.
    pub product_id: u64,

    /// Display name, snapshotted at add time.
    pub name: String,

    /// Unit price in major currency units, snapshotted at add time.
    pub price: Decimal,

    /// Quantity, never below [`MIN_ORDER_QTY`].
    pub quantity: u32,

    /// Last-known stock ceiling. Zero means no ceiling is applied.
    #[serde(default)]
    pub stock: u32,

    /// Display image URL, snapshotted at add time.
    #[serde(default)]
    pub image: Option<String>,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The cart store.
///
/// Purely client-local until submitted as an order; the mapping has no
/// server-side counterpart.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: FxHashMap<u64, CartLine>,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Restore a cart from the given storage backend.
    ///
    /// A load failure degrades to an empty cart and is never surfaced.
    #[must_use]
    pub fn restore(storage: S) -> Self {
        let lines = storage
            .load()
            .unwrap_or_default()
            .into_iter()
            .map(|line| (line.product_id, line))
            .collect();

        Self { lines, storage }
    }

    /// Add a product to the cart, merging with any existing line.
    ///
    /// The effective quantity is the requested quantity floored at
    /// [`MIN_ORDER_QTY`], defaulting to the minimum when omitted, and the
    /// resulting line quantity is capped at the product's nonzero stock. An
    /// explicit zero request is a no-op, matching the remove-on-zero policy
    /// of [`Self::update_quantity`].
    pub fn add_item(&mut self, product: &ProductSnapshot, quantity: Option<u32>) {
        if quantity == Some(0) {
            return;
        }

        let effective = quantity.unwrap_or(MIN_ORDER_QTY).max(MIN_ORDER_QTY);

        if let Some(line) = self.lines.get_mut(&product.id) {
            line.stock = product.stock;
            line.quantity = clamp_to_stock(line.quantity.saturating_add(effective), product.stock);
        } else {
            self.lines.insert(
                product.id,
                CartLine {
                    product_id: product.id,
                    name: product.name.clone(),
                    price: product.price,
                    quantity: clamp_to_stock(effective, product.stock),
                    stock: product.stock,
                    image: product.display_image().map(str::to_owned),
                },
            );
        }

        self.persist();
    }

    /// Set the quantity for a product already in the cart.
    ///
    /// Zero removes the line; any other value is floored at
    /// [`MIN_ORDER_QTY`] and capped at the line's nonzero stock ceiling.
    /// Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: u64, quantity: u32) {
        if quantity == 0 {
            if self.lines.remove(&product_id).is_some() {
                self.persist();
            }

            return;
        }

        let Some(line) = self.lines.get_mut(&product_id) else {
            return;
        };

        line.quantity = clamp_to_stock(quantity.max(MIN_ORDER_QTY), line.stock);

        self.persist();
    }

    /// Drop the line for a product. Unknown product ids are ignored.
    pub fn remove_item(&mut self, product_id: u64) {
        if self.lines.remove(&product_id).is_some() {
            self.persist();
        }
    }

    /// Empty the cart. Always persists the empty state.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    /// Cart total in major currency units.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.values().map(CartLine::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn line(&self, product_id: u64) -> Option<&CartLine> {
        self.lines.get(&product_id)
    }

    /// The lines ordered by product id.
    ///
    /// Map iteration order carries no meaning; sorting keeps rendering and
    /// persistence stable.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self.lines.values().cloned().collect();
        lines.sort_by_key(|line| line.product_id);

        lines
    }

    /// Borrow the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning the storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let lines = self.lines();

        // A failed save is an accepted data-loss mode: the in-memory cart
        // stays authoritative and the next restore starts empty.
        let _saved = self.storage.save(&lines);
    }
}

fn clamp_to_stock(quantity: u32, stock: u32) -> u32 {
    if stock == 0 {
        quantity
    } else {
        quantity.min(stock)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::{MemoryStorage, StorageError};

    use super::*;

    fn product(id: u64, price: u64, stock: u32) -> ProductSnapshot {
        ProductSnapshot {
            id,
            name: format!("Product {id}"),
            price: Decimal::from(price),
            stock,
            images: vec![format!("product-{id}.jpg")],
            cover_image: None,
            image1: None,
            image2: None,
        }
    }

    fn store() -> CartStore<MemoryStorage> {
        CartStore::restore(MemoryStorage::new())
    }

    /// Storage that accepts nothing and fails every load.
    #[derive(Debug, Default)]
    struct FailingStorage;

    impl CartStorage for FailingStorage {
        fn load(&self) -> Result<Vec<CartLine>, StorageError> {
            Err(StorageError::Serialize("backend unavailable".to_owned()))
        }

        fn save(&mut self, _lines: &[CartLine]) -> Result<(), StorageError> {
            Err(StorageError::Serialize("backend unavailable".to_owned()))
        }
    }

    #[test]
    fn add_item_defaults_to_minimum_quantity() {
        let mut cart = store();

        cart.add_item(&product(7, 100, 0), None);

        assert_eq!(cart.line(7).map(|line| line.quantity), Some(MIN_ORDER_QTY));
        assert_eq!(cart.total(), Decimal::from(300));
    }

    #[test]
    fn add_item_floors_requested_quantity_at_minimum() {
        let mut cart = store();

        cart.add_item(&product(7, 100, 5), Some(2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(7).map(|line| line.quantity), Some(3));
        assert_eq!(cart.total(), Decimal::from(300));
    }

    #[test]
    fn add_item_merges_and_clamps_to_stock() {
        let mut cart = store();

        cart.add_item(&product(7, 100, 5), Some(2));
        cart.add_item(&product(7, 100, 5), Some(4));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(7).map(|line| line.quantity), Some(5));
        assert_eq!(cart.total(), Decimal::from(500));
    }

    #[test]
    fn add_item_without_known_stock_has_no_ceiling() {
        let mut cart = store();

        cart.add_item(&product(7, 100, 0), Some(50));
        cart.add_item(&product(7, 100, 0), Some(50));

        assert_eq!(cart.line(7).map(|line| line.quantity), Some(100));
    }

    #[test]
    fn add_item_with_explicit_zero_is_a_no_op() {
        let mut cart = store();

        cart.add_item(&product(7, 100, 5), Some(0));

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn add_item_snapshots_display_image() {
        let mut cart = store();

        cart.add_item(&product(7, 100, 5), None);

        assert_eq!(
            cart.line(7).and_then(|line| line.image.clone()),
            Some("product-7.jpg".to_owned())
        );
    }

    #[test]
    fn add_then_remove_restores_previous_totals() {
        let mut cart = store();
        cart.add_item(&product(1, 250, 0), Some(4));

        let total_before = cart.total();
        let count_before = cart.item_count();

        cart.add_item(&product(7, 100, 5), Some(3));
        cart.remove_item(7);

        assert!(cart.line(7).is_none());
        assert_eq!(cart.total(), total_before);
        assert_eq!(cart.item_count(), count_before);
    }

    #[test]
    fn update_quantity_zero_removes_the_line() {
        let mut cart = store();
        cart.add_item(&product(7, 100, 5), None);

        cart.update_quantity(7, 0);

        assert!(cart.is_empty());
        assert!(cart.storage().lines().is_empty());
    }

    #[test]
    fn update_quantity_on_absent_product_is_a_no_op() {
        let mut cart = store();
        cart.add_item(&product(1, 250, 0), None);

        let before = cart.lines();

        cart.update_quantity(7, 4);

        assert_eq!(cart.lines(), before);
    }

    #[test]
    fn update_quantity_floors_manual_decrement_at_minimum() {
        let mut cart = store();
        cart.add_item(&product(7, 100, 0), Some(5));

        cart.update_quantity(7, 2);

        assert_eq!(cart.line(7).map(|line| line.quantity), Some(3));
    }

    #[test]
    fn update_quantity_clamps_to_line_stock() {
        let mut cart = store();
        cart.add_item(&product(7, 100, 5), None);

        cart.update_quantity(7, 9);

        assert_eq!(cart.line(7).map(|line| line.quantity), Some(5));
    }

    #[test]
    fn remove_item_on_absent_product_is_a_no_op() {
        let mut cart = store();
        cart.add_item(&product(1, 250, 0), None);

        cart.remove_item(7);

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn clear_empties_cart_and_persists_empty_state() {
        let mut cart = store();
        cart.add_item(&product(1, 100, 0), None);
        cart.add_item(&product(2, 200, 0), None);
        cart.add_item(&product(3, 300, 0), None);

        cart.clear();

        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
        assert!(cart.storage().lines().is_empty());
    }

    #[test]
    fn empty_cart_derived_values_are_zero() {
        let cart = store();

        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn mutations_are_mirrored_to_storage() {
        let mut cart = store();

        cart.add_item(&product(7, 100, 5), None);
        cart.add_item(&product(2, 50, 0), Some(4));

        let persisted = cart.storage().lines().to_vec();

        assert_eq!(persisted, cart.lines());
        assert_eq!(persisted.len(), 2);
    }

    #[test]
    fn restore_round_trips_through_storage() {
        let mut cart = store();
        cart.add_item(&product(7, 100, 5), Some(4));
        cart.add_item(&product(2, 50, 0), None);

        let expected = cart.lines();
        let restored = CartStore::restore(cart.into_storage());

        assert_eq!(restored.lines(), expected);
    }

    #[test]
    fn restore_from_failing_storage_yields_empty_cart() {
        let cart = CartStore::restore(FailingStorage);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn save_failures_keep_in_memory_state_authoritative() {
        let mut cart = CartStore::restore(FailingStorage);

        cart.add_item(&product(7, 100, 5), Some(4));

        assert_eq!(cart.line(7).map(|line| line.quantity), Some(4));
        assert_eq!(cart.total(), Decimal::from(400));
    }

    #[test]
    fn lines_are_ordered_by_product_id() {
        let mut cart = store();
        cart.add_item(&product(9, 100, 0), None);
        cart.add_item(&product(1, 100, 0), None);
        cart.add_item(&product(4, 100, 0), None);

        let ids: Vec<u64> = cart.lines().iter().map(|line| line.product_id).collect();

        assert_eq!(ids, vec![1, 4, 9]);
    }

    #[test]
    fn persisted_lines_use_storefront_field_names() -> TestResult {
        let mut cart = store();
        cart.add_item(&product(7, 100, 5), None);

        let json = serde_json::to_value(cart.lines())?;
        let first = json.get(0).cloned().unwrap_or_default();

        assert_eq!(
            first.get("productId").and_then(serde_json::Value::as_u64),
            Some(7)
        );
        assert!(first.get("quantity").is_some(), "quantity field missing");

        Ok(())
    }
}
