//! Cart state machine.
//!
//! The cart is a plain value: an ordered sequence of [`CartLine`] plus
//! derived totals, mutated synchronously and re-totalled after every
//! operation. Persistence is the caller's concern (the storefront keeps one
//! cart per session and writes the line sequence back after each mutation);
//! this module performs no I/O.
//!
//! Lines are keyed two different ways on purpose:
//!
//! - [`CartState::add_line`] merges on the full variant key
//!   `(product_id, size, color)`
//! - [`CartState::remove_line`] and [`CartState::set_quantity`] key on
//!   `product_id` alone, so they affect every variant of that product
//!
//! The asymmetry mirrors the storefront's established behavior; callers that
//! need per-variant removal must not rely on `remove_line`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, ProductId};

/// One product/variant/quantity entry in a pending order.
///
/// Serialized as camelCase JSON, both in the session store and in API
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub image_ref: String,
    pub category: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub material: String,
}

impl CartLine {
    /// The merge key for [`CartState::add_line`].
    fn variant_key(&self) -> (ProductId, Option<&str>, Option<&str>) {
        (self.product_id, self.size.as_deref(), self.color.as_deref())
    }

    /// Line subtotal (`unit_price * quantity`).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The authoritative in-memory representation of a pending order.
///
/// Invariant: after every mutation, `total_items == sum(quantity)` and
/// `total_amount == sum(unit_price * quantity)` over `lines`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    lines: Vec<CartLine>,
    total_items: u32,
    total_amount: Decimal,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current line sequence, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of items across all lines.
    #[must_use]
    pub const fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Total amount across all lines.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Total amount as a displayable [`Price`] (the shop trades in USD).
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::new(self.total_amount, CurrencyCode::USD)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same `(product_id, size, color)` already exists,
    /// its quantity is incremented by the new line's quantity; otherwise the
    /// line is appended. Stock availability is not checked here (the
    /// commerce API validates it at order submission).
    pub fn add_line(&mut self, line: CartLine) {
        let existing = self
            .lines
            .iter()
            .position(|candidate| candidate.variant_key() == line.variant_key());
        match existing {
            Some(index) => {
                if let Some(existing) = self.lines.get_mut(index) {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
            }
            None => self.lines.push(line),
        }
        self.recompute();
    }

    /// Remove every line with the given product id, regardless of variant.
    ///
    /// A no-op when no line matches (including on an empty cart).
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
        self.recompute();
    }

    /// Set the quantity of every line with the given product id.
    ///
    /// A quantity of zero routes to [`Self::remove_line`]. A no-op when no
    /// line matches.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_line(product_id);
            return;
        }
        for line in &mut self.lines {
            if line.product_id == product_id {
                line.quantity = quantity;
            }
        }
        self.recompute();
    }

    /// Update size/color on the first line with the given product id.
    ///
    /// Passing `None` leaves the corresponding option untouched. Totals are
    /// unaffected (no price change is implied by an option change).
    pub fn update_options(
        &mut self,
        product_id: ProductId,
        size: Option<String>,
        color: Option<String>,
    ) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            if let Some(size) = size {
                line.size = Some(size);
            }
            if let Some(color) = color {
                line.color = Some(color);
            }
        }
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    /// Replace the cart contents with the given sequence, recomputing totals
    /// from scratch. Used when rehydrating a persisted cart.
    #[must_use]
    pub fn restore(lines: Vec<CartLine>) -> Self {
        let mut cart = Self {
            lines,
            total_items: 0,
            total_amount: Decimal::ZERO,
        };
        cart.recompute();
        cart
    }

    /// Consume the cart, yielding its line sequence for persistence.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    fn recompute(&mut self) {
        self.total_items = self
            .lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity));
        self.total_amount = self.lines.iter().map(CartLine::subtotal).sum();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(product_id: i64, quantity: u32, price: i64) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            name: format!("Belt {product_id}"),
            unit_price: Decimal::from(price),
            original_price: None,
            image_ref: format!("/images/{product_id}.jpg"),
            category: "belts".to_string(),
            quantity,
            size: None,
            color: None,
            material: "full-grain".to_string(),
        }
    }

    fn variant(product_id: i64, quantity: u32, price: i64, size: &str, color: &str) -> CartLine {
        CartLine {
            size: Some(size.to_string()),
            color: Some(color.to_string()),
            ..line(product_id, quantity, price)
        }
    }

    #[test]
    fn test_distinct_lines_stay_distinct() {
        let mut cart = CartState::new();
        cart.add_line(variant(1, 2, 100, "M", "tan"));
        cart.add_line(variant(1, 1, 100, "L", "tan"));
        cart.add_line(variant(2, 3, 40, "M", "brown"));

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.total_items(), 6);
        assert_eq!(cart.total_amount(), Decimal::from(2 * 100 + 100 + 3 * 40));
    }

    #[test]
    fn test_same_variant_merges() {
        let mut cart = CartState::new();
        cart.add_line(line(1, 2, 100));
        cart.add_line(line(1, 3, 100));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_amount(), Decimal::from(500));
    }

    #[test]
    fn test_differing_options_do_not_merge() {
        let mut cart = CartState::new();
        cart.add_line(variant(1, 1, 100, "M", "tan"));
        cart.add_line(variant(1, 1, 100, "M", "black"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_remove_line_drops_all_variants() {
        // remove_line keys by product id only; every variant goes.
        let mut cart = CartState::new();
        cart.add_line(variant(1, 1, 100, "M", "tan"));
        cart.add_line(variant(1, 2, 100, "L", "black"));
        cart.add_line(line(2, 1, 40));

        cart.remove_line(ProductId::new(1));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, ProductId::new(2));
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_amount(), Decimal::from(40));
    }

    #[test]
    fn test_remove_line_on_empty_cart_is_noop() {
        let mut cart = CartState::new();
        cart.remove_line(ProductId::new(1));

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut removed = CartState::new();
        removed.add_line(variant(1, 2, 100, "M", "tan"));
        removed.add_line(line(2, 1, 40));
        let mut zeroed = removed.clone();

        removed.remove_line(ProductId::new(1));
        zeroed.set_quantity(ProductId::new(1), 0);

        assert_eq!(removed, zeroed);
    }

    #[test]
    fn test_set_quantity_replaces_and_retotals() {
        let mut cart = CartState::new();
        cart.add_line(line(1, 2, 100));
        cart.set_quantity(ProductId::new(1), 7);

        assert_eq!(cart.lines()[0].quantity, 7);
        assert_eq!(cart.total_items(), 7);
        assert_eq!(cart.total_amount(), Decimal::from(700));
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = CartState::new();
        cart.add_line(line(1, 2, 100));
        cart.set_quantity(ProductId::new(99), 5);

        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_update_options_first_match_only() {
        let mut cart = CartState::new();
        cart.add_line(variant(1, 1, 100, "M", "tan"));
        cart.add_line(variant(1, 1, 100, "L", "black"));

        let total_before = cart.total_amount();
        cart.update_options(ProductId::new(1), Some("XL".to_string()), None);

        assert_eq!(cart.lines()[0].size.as_deref(), Some("XL"));
        assert_eq!(cart.lines()[0].color.as_deref(), Some("tan"));
        assert_eq!(cart.lines()[1].size.as_deref(), Some("L"));
        assert_eq!(cart.total_amount(), total_before);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        cart.add_line(line(1, 2, 100));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_restore_recomputes_totals() {
        let lines = vec![variant(1, 2, 100, "M", "tan"), line(2, 3, 40)];
        let cart = CartState::restore(lines.clone());

        assert_eq!(cart.lines(), lines.as_slice());
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_amount(), Decimal::from(2 * 100 + 3 * 40));
    }

    #[test]
    fn test_total_price_display() {
        let mut cart = CartState::new();
        cart.add_line(line(1, 2, 100));
        assert_eq!(cart.total_price().display(), "$200.00");
    }

    #[test]
    fn test_line_wire_format_is_camel_case() {
        let json = serde_json::to_value(variant(1, 2, 100, "M", "tan")).unwrap();
        assert!(json.get("productId").is_some());
        assert!(json.get("imageRef").is_some());
        assert!(json.get("unitPrice").is_some());
        assert!(json.get("product_id").is_none());
    }

    #[test]
    fn test_line_roundtrip_through_json() {
        let original = variant(3, 4, 250, "L", "oxblood");
        let json = serde_json::to_string(&vec![original.clone()]).unwrap();
        let restored: Vec<CartLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, vec![original]);
    }
}
