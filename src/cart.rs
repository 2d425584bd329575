//! The client-held shopping cart. The cart lives with the storefront session,
//! not the server: lines are keyed by product id, insertion order is kept for
//! display, and every mutation writes the full snapshot through a [`CartStore`]
//! so the cart survives restarts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Fixed application key for the persisted cart snapshot.
pub const CART_STORAGE_KEY: &str = "bakeryCart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i32,
    pub name: String,
    /// Unit price captured when the product was first added; later catalog
    /// changes do not affect lines already in the cart.
    pub price: i64,
    pub quantity: i32,
}

/// Durable storage boundary for the cart snapshot. Swappable so tests can run
/// against an in-memory store.
pub trait CartStore {
    /// Load the persisted snapshot. A missing or malformed snapshot is an
    /// empty cart, never an error.
    fn load(&self) -> Vec<CartLine>;

    fn save(&self, lines: &[CartLine]) -> anyhow::Result<()>;
}

/// JSON-file-backed store, one file per application key.
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CART_STORAGE_KEY}.json")),
        }
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> Vec<CartLine> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save(&self, lines: &[CartLine]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(lines)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryCartStore {
    lines: Mutex<Vec<CartLine>>,
}

impl MemoryCartStore {
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.lock().unwrap().clone()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Vec<CartLine> {
        self.lines.lock().unwrap().clone()
    }

    fn save(&self, lines: &[CartLine]) -> anyhow::Result<()> {
        *self.lines.lock().unwrap() = lines.to_vec();
        Ok(())
    }
}

pub struct Cart<S: CartStore> {
    lines: Vec<CartLine>,
    store: S,
}

impl<S: CartStore> Cart<S> {
    /// Restore the cart from the store at session start.
    pub fn restore(store: S) -> Self {
        let lines = store.load();
        Self { lines, store }
    }

    /// Add one unit of a product. A repeated add increments the existing line
    /// rather than creating a second one. Always succeeds.
    pub fn add_item(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            }),
        }
        self.persist();
    }

    /// Set a line to an absolute quantity. Zero or below removes the line.
    /// No-op for an unknown product id.
    pub fn update_quantity(&mut self, product_id: i32, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
            self.persist();
        }
    }

    pub fn remove_item(&mut self, product_id: i32) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .map(|l| l.price * i64::from(l.quantity))
            .sum()
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.lines) {
            tracing::warn!(error = %err, "cart snapshot save failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn cart() -> Cart<MemoryCartStore> {
        Cart::restore(MemoryCartStore::default())
    }

    #[test]
    fn repeated_add_increments_one_line() {
        let cake = catalog::find(1).unwrap();
        let mut cart = cart();

        cart.add_item(cake);
        cart.add_item(cake);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn update_quantity_sets_absolute_value() {
        let cake = catalog::find(1).unwrap();
        let mut cart = cart();

        cart.add_item(cake);
        cart.update_quantity(cake.id, 5);

        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total(), cake.price * 5);
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let cake = catalog::find(1).unwrap();
        let croissants = catalog::find(2).unwrap();
        let mut cart = cart();

        cart.add_item(cake);
        cart.add_item(croissants);
        cart.update_quantity(cake.id, 0);
        cart.remove_item(croissants.id);

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn update_quantity_for_unknown_product_is_noop() {
        let cake = catalog::find(1).unwrap();
        let mut cart = cart();

        cart.add_item(cake);
        cart.update_quantity(999, 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn total_tracks_any_mutation_sequence() {
        let cake = catalog::find(1).unwrap();
        let bread = catalog::find(3).unwrap();
        let mut cart = cart();

        cart.add_item(cake);
        cart.add_item(bread);
        cart.add_item(bread);
        cart.update_quantity(cake.id, 3);
        cart.remove_item(bread.id);

        assert_eq!(cart.total(), cake.price * 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn every_mutation_persists_the_snapshot() {
        let cake = catalog::find(1).unwrap();
        let store = MemoryCartStore::default();
        let mut cart = Cart::restore(store);

        cart.add_item(cake);
        assert_eq!(cart.store.snapshot().len(), 1);

        cart.clear();
        assert!(cart.store.snapshot().is_empty());
    }

    #[test]
    fn restore_round_trips_through_the_store() {
        let cake = catalog::find(1).unwrap();
        let store = MemoryCartStore::default();
        store
            .save(&[CartLine {
                product_id: cake.id,
                name: cake.name.clone(),
                price: cake.price,
                quantity: 2,
            }])
            .unwrap();

        let cart = Cart::restore(store);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), cake.price * 2);
    }

    #[test]
    fn malformed_file_snapshot_loads_as_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path());
        fs::write(
            dir.path().join(format!("{CART_STORAGE_KEY}.json")),
            "not json at all",
        )
        .unwrap();

        let cart = Cart::restore(store);
        assert!(cart.is_empty());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cake = catalog::find(1).unwrap();

        {
            let mut cart = Cart::restore(FileCartStore::new(dir.path()));
            cart.add_item(cake);
            cart.add_item(cake);
        }

        let cart = Cart::restore(FileCartStore::new(dir.path()));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.lines()[0].name, "Chocolate Cake");
    }
}
