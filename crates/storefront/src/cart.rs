//! Session cart store.
//!
//! The cart is owned by the top-level session state and mutated only through
//! the operations here. It is never persisted, so a page reload starts empty.
//! Lines are identified by a fresh [`LineId`] per add, so the same
//! product/size/color can sit in the cart as separate lines; duplicate lines
//! are deliberately not merged.

use boutik_core::{LineId, LocalizedText, Price, ProductId, VariantId};

use crate::catalog::Product;

/// One added-to-cart entry: a product snapshot plus the chosen variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub line_id: LineId,
    pub product_id: ProductId,
    /// Product name snapshot for the drawer and order summary.
    pub name: LocalizedText,
    pub image_url: String,
    /// Unit price captured at add time.
    pub unit_price: Price,
    /// Resolved variant, or [`VariantId::UNKNOWN`] when the pair matched
    /// nothing (the add still goes through).
    pub variant_id: VariantId,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (`unit_price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The session cart and its drawer state.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    open: bool,
}

impl CartStore {
    /// Create an empty cart with the drawer closed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            open: false,
        }
    }

    /// Append a new line for `product` with the chosen size/color.
    ///
    /// The matching variant id is recorded when the pair resolves;
    /// otherwise the sentinel [`VariantId::UNKNOWN`] is kept so the order
    /// write still carries a value. Opens the drawer as a side effect.
    pub fn add(&mut self, product: &Product, size: &str, color: &str, quantity: u32) -> LineId {
        let variant_id = product
            .variant(size, color)
            .map_or(VariantId::UNKNOWN, |v| v.id);

        let line_id = LineId::generate();
        self.lines.push(CartLine {
            line_id,
            product_id: product.id,
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            unit_price: product.price,
            variant_id,
            size: size.to_string(),
            color: color.to_string(),
            quantity,
        });
        self.open = true;
        line_id
    }

    /// Remove a line by identity; no-op when absent.
    pub fn remove(&mut self, line_id: LineId) {
        self.lines.retain(|line| line.line_id != line_id);
    }

    /// Empty the cart. Called after a confirmed order submission.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Running total, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (not summed quantities); the navbar badge count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the cart drawer is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::tshirt;

    #[test]
    fn test_add_resolves_variant_and_opens_drawer() {
        let mut cart = CartStore::new();
        let product = tshirt();

        cart.add(&product, "M", "Red", 2);

        assert_eq!(cart.len(), 1);
        assert!(cart.is_open());
        let line = cart.lines().first().unwrap();
        assert_eq!(line.variant_id, VariantId::new(11));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Price::dinars(2000));
    }

    #[test]
    fn test_add_unmatched_pair_records_sentinel() {
        let mut cart = CartStore::new();
        cart.add(&tshirt(), "XXL", "Purple", 1);

        let line = cart.lines().first().unwrap();
        assert!(line.variant_id.is_unknown());
    }

    #[test]
    fn test_duplicate_adds_stay_separate_lines() {
        let mut cart = CartStore::new();
        let product = tshirt();
        let first = cart.add(&product, "M", "Red", 1);
        let second = cart.add(&product, "M", "Red", 1);

        assert_ne!(first, second);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_total_sums_lines() {
        let mut cart = CartStore::new();
        let product = tshirt();
        cart.add(&product, "M", "Red", 2); // 4000
        cart.add(&product, "L", "Red", 1); // 2000

        assert_eq!(cart.total(), Price::dinars(6000));
    }

    #[test]
    fn test_add_then_remove_restores_total() {
        let mut cart = CartStore::new();
        let product = tshirt();
        cart.add(&product, "M", "Red", 1);
        let before = cart.total();

        let line_id = cart.add(&product, "M", "Black", 3);
        cart.remove(line_id);

        assert_eq!(cart.total(), before);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = CartStore::new();
        cart.add(&tshirt(), "M", "Red", 1);

        cart.remove(LineId::generate());

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = CartStore::new();
        let product = tshirt();
        cart.add(&product, "M", "Red", 1);
        cart.add(&product, "L", "Red", 1);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }
}
