//! Product detail page state: the size/color/quantity picker.
//!
//! Selection is ordered: size first, then color, then quantity. Picking a
//! new size wipes the color and quantity so a stale pair can never reach
//! the cart. All guards live here; the cart itself accepts whatever it is
//! handed.

use boutik_core::{Language, LineId};
use thiserror::Error;

use crate::cart::CartStore;
use crate::catalog::Product;

/// Why an add-to-cart attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("size and color must be selected")]
    Incomplete,
    #[error("selected combination is out of stock")]
    OutOfStock,
}

impl SelectionError {
    /// Customer-facing message in the active language.
    #[must_use]
    pub const fn message(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Incomplete, Language::En) => "Please select a size and a color",
            (Self::Incomplete, Language::Ar) => "الرجاء اختيار المقاس واللون",
            (Self::OutOfStock, Language::En) => "This combination is out of stock",
            (Self::OutOfStock, Language::Ar) => "هذا الخيار غير متوفر حاليا",
        }
    }
}

/// Picker state for one product detail view.
#[derive(Debug, Clone)]
pub struct VariantPicker {
    product: Product,
    selected_size: Option<String>,
    selected_color: Option<String>,
    quantity: u32,
    error: Option<SelectionError>,
}

impl VariantPicker {
    /// Fresh picker: nothing selected, quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            selected_size: None,
            selected_color: None,
            quantity: 1,
            error: None,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    #[must_use]
    pub fn selected_color(&self) -> Option<&str> {
        self.selected_color.as_deref()
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Last rejected add, shown inline until the selection changes.
    #[must_use]
    pub const fn error(&self) -> Option<SelectionError> {
        self.error
    }

    /// Select a size. Resets color and quantity; ignored when every color
    /// of that size is sold out (the button renders disabled).
    pub fn select_size(&mut self, size: &str) {
        if !self.product.size_has_stock(size) {
            return;
        }
        self.selected_size = Some(size.to_string());
        self.selected_color = None;
        self.quantity = 1;
        self.error = None;
    }

    /// Select a color. Ignored until a size is chosen, and ignored when the
    /// resulting pair has no stock.
    pub fn select_color(&mut self, color: &str) {
        let Some(size) = self.selected_size.as_deref() else {
            return;
        };
        if self.product.stock(size, color) == 0 {
            return;
        }
        self.selected_color = Some(color.to_string());
        self.quantity = 1;
        self.error = None;
    }

    /// Stock of the currently selected pair; `None` until both are chosen.
    #[must_use]
    pub fn current_stock(&self) -> Option<u32> {
        let size = self.selected_size.as_deref()?;
        let color = self.selected_color.as_deref()?;
        Some(self.product.stock(size, color))
    }

    #[must_use]
    pub fn can_increment(&self) -> bool {
        self.current_stock()
            .is_some_and(|stock| self.quantity < stock)
    }

    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    /// Raise quantity, capped at the selected pair's stock.
    pub fn increment(&mut self) {
        if self.can_increment() {
            self.quantity += 1;
        }
    }

    /// Lower quantity, floored at 1.
    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.quantity -= 1;
        }
    }

    /// Push the current selection into the cart.
    ///
    /// Rejects an incomplete selection or a sold-out pair without touching
    /// the cart; the error is also kept on the picker for inline display.
    pub fn add_to_cart(&mut self, cart: &mut CartStore) -> Result<LineId, SelectionError> {
        let (Some(size), Some(color)) = (
            self.selected_size.as_deref(),
            self.selected_color.as_deref(),
        ) else {
            self.error = Some(SelectionError::Incomplete);
            return Err(SelectionError::Incomplete);
        };

        // Final blocking check against the live stock snapshot, even though
        // the selection guards already keep quantity within range.
        let stock = self.product.stock(size, color);
        if stock == 0 || self.quantity > stock {
            self.error = Some(SelectionError::OutOfStock);
            return Err(SelectionError::OutOfStock);
        }

        let line_id = cart.add(&self.product, size, color, self.quantity);
        self.error = None;
        Ok(line_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{sold_out_hoodie, tshirt};

    #[test]
    fn test_select_size_resets_color_and_quantity() {
        let mut picker = VariantPicker::new(tshirt());
        picker.select_size("M");
        picker.select_color("Red");
        picker.increment();
        assert_eq!(picker.quantity(), 2);

        picker.select_size("L");

        assert_eq!(picker.selected_size(), Some("L"));
        assert_eq!(picker.selected_color(), None);
        assert_eq!(picker.quantity(), 1);
    }

    #[test]
    fn test_select_stockless_size_is_ignored() {
        let mut picker = VariantPicker::new(sold_out_hoodie());
        picker.select_size("M");
        assert_eq!(picker.selected_size(), None);
    }

    #[test]
    fn test_select_color_requires_size() {
        let mut picker = VariantPicker::new(tshirt());
        picker.select_color("Red");
        assert_eq!(picker.selected_color(), None);
    }

    #[test]
    fn test_select_sold_out_color_is_ignored() {
        let mut picker = VariantPicker::new(tshirt());
        picker.select_size("L");
        picker.select_color("Black"); // (L, Black) has zero stock
        assert_eq!(picker.selected_color(), None);
    }

    #[test]
    fn test_quantity_clamped_to_stock() {
        let mut picker = VariantPicker::new(tshirt());
        picker.select_size("L");
        picker.select_color("Red"); // stock 1

        assert!(!picker.can_increment());
        picker.increment();
        assert_eq!(picker.quantity(), 1);

        picker.decrement();
        assert_eq!(picker.quantity(), 1);
    }

    #[test]
    fn test_add_to_cart_incomplete_selection() {
        let mut picker = VariantPicker::new(tshirt());
        let mut cart = CartStore::new();
        picker.select_size("M");

        let result = picker.add_to_cart(&mut cart);

        assert_eq!(result, Err(SelectionError::Incomplete));
        assert_eq!(picker.error(), Some(SelectionError::Incomplete));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_to_cart_success_clears_error() {
        let mut picker = VariantPicker::new(tshirt());
        let mut cart = CartStore::new();

        assert!(picker.add_to_cart(&mut cart).is_err());

        picker.select_size("M");
        picker.select_color("Red");
        picker.increment();
        let line_id = picker.add_to_cart(&mut cart).unwrap();

        assert!(picker.error().is_none());
        assert_eq!(cart.len(), 1);
        let line = cart.lines().first().unwrap();
        assert_eq!(line.line_id, line_id);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_selection_clears_stale_error() {
        let mut picker = VariantPicker::new(tshirt());
        let mut cart = CartStore::new();
        assert!(picker.add_to_cart(&mut cart).is_err());

        picker.select_size("M");

        assert!(picker.error().is_none());
    }

    #[test]
    fn test_localized_messages() {
        assert_eq!(
            SelectionError::Incomplete.message(Language::En),
            "Please select a size and a color"
        );
        assert!(!SelectionError::OutOfStock.message(Language::Ar).is_empty());
    }
}
