//! Cart and cart line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use steep_core::{unit_price, MenuItem, ModifierSelection, OrderTotals, TaxRate};

/// Errors arising from cart operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    /// No line with the given id exists (it may have been removed).
    #[error("cart line not found: {0}")]
    LineNotFound(LineId),
}

/// Stable identity for one cart line.
///
/// Survives removal of *other* lines, unlike the positional indices the
/// legacy surfaces used — a held id either resolves to the same line or to
/// nothing, never to a neighbor that shifted into its slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct LineId(Uuid);

impl LineId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of a quantity decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Quantity changed to the given value.
    Changed(u32),
    /// The line was at quantity 1. Nothing was mutated — the caller must
    /// confirm with the user and then call [`Cart::remove_line`]. Decrement
    /// is never a silent destructive removal.
    RemovalRequested,
}

/// One configured, priced drink entry awaiting checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    /// Stable line id.
    pub id: LineId,
    /// Catalog id of the base drink.
    pub menu_id: i32,
    /// Drink display name.
    pub name: String,
    /// Base unit price captured at selection time — never re-fetched.
    #[schema(value_type = String)]
    pub base_price: Decimal,
    /// Computed unit price (base + surcharge + toppings), unrounded.
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    /// Number of this drink, always ≥ 1.
    pub quantity: u32,
    /// The customization this line was committed with.
    pub modifiers: ModifierSelection,
}

impl CartLine {
    /// This line's contribution to the cart subtotal.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An ordered, session-scoped collection of cart lines.
///
/// Invariant: `subtotal ≡ Σ(line.unit_price × line.quantity)` — enforced by
/// construction, since every mutation reprices through the pricing engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new line, pricing the selection now (commit time).
    ///
    /// A requested quantity of 0 is floor-clamped to 1.
    pub fn add_line(
        &mut self,
        item: &MenuItem,
        modifiers: ModifierSelection,
        quantity: u32,
    ) -> LineId {
        let id = LineId::new();
        let price = unit_price(item.price, &modifiers);
        self.lines.push(CartLine {
            id,
            menu_id: item.id,
            name: item.name.clone(),
            base_price: item.price,
            unit_price: price,
            quantity: quantity.max(1),
            modifiers,
        });
        id
    }

    /// Replace a line's modifiers in place, repricing against the captured
    /// base price and preserving its quantity (edit-in-place, not
    /// append-a-duplicate).
    pub fn update_line(
        &mut self,
        id: LineId,
        modifiers: ModifierSelection,
    ) -> Result<(), CartError> {
        let line = self.line_mut(id)?;
        line.unit_price = unit_price(line.base_price, &modifiers);
        line.modifiers = modifiers;
        Ok(())
    }

    /// Increase a line's quantity by one.
    pub fn increment(&mut self, id: LineId) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        line.quantity += 1;
        Ok(line.quantity)
    }

    /// Decrease a line's quantity by one.
    ///
    /// At quantity 1 this returns [`QuantityChange::RemovalRequested`]
    /// without mutating anything; the caller prompts and then removes.
    pub fn decrement(&mut self, id: LineId) -> Result<QuantityChange, CartError> {
        let line = self.line_mut(id)?;
        if line.quantity <= 1 {
            return Ok(QuantityChange::RemovalRequested);
        }
        line.quantity -= 1;
        Ok(QuantityChange::Changed(line.quantity))
    }

    /// Remove a line, returning it. Remaining lines keep their ids.
    pub fn remove_line(&mut self, id: LineId) -> Result<CartLine, CartError> {
        let pos = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(CartError::LineNotFound(id))?;
        Ok(self.lines.remove(pos))
    }

    /// Published totals for the cart at the given tax rate.
    pub fn totals(&self, rate: TaxRate, tip: Option<Decimal>) -> OrderTotals {
        let raw: Decimal = self.lines.iter().map(CartLine::line_total).sum();
        OrderTotals::compute(raw, rate, tip)
    }

    /// Look up a line.
    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (not units).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line (checkout success or explicit empty).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut CartLine, CartError> {
        self.lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CartError::LineNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use steep_core::{Category, Size, ToppingRef};

    fn milk_tea() -> MenuItem {
        MenuItem {
            id: 12,
            name: "Classic Milk Tea".to_string(),
            price: dec!(5.00),
            category: Category::Drink,
        }
    }

    fn large_with_toppings() -> ModifierSelection {
        ModifierSelection {
            size: Size::Large,
            toppings: vec![
                ToppingRef {
                    id: 51,
                    name: "Boba".to_string(),
                    price: Some(dec!(0.95)),
                },
                ToppingRef {
                    id: 52,
                    name: "Pudding".to_string(),
                    price: Some(dec!(0.75)),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn add_line_prices_at_commit_time() {
        let mut cart = Cart::new();
        let id = cart.add_line(&milk_tea(), large_with_toppings(), 1);
        let line = cart.line(id).unwrap();
        assert_eq!(line.unit_price, dec!(7.70));
        assert_eq!(line.base_price, dec!(5.00));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn add_line_clamps_zero_quantity() {
        let mut cart = Cart::new();
        let id = cart.add_line(&milk_tea(), ModifierSelection::default(), 0);
        assert_eq!(cart.line(id).unwrap().quantity, 1);
    }

    #[test]
    fn update_line_reprices_and_keeps_quantity() {
        let mut cart = Cart::new();
        let id = cart.add_line(&milk_tea(), ModifierSelection::default(), 3);
        assert_eq!(cart.line(id).unwrap().unit_price, dec!(5.00));

        cart.update_line(id, large_with_toppings()).unwrap();
        let line = cart.line(id).unwrap();
        assert_eq!(line.unit_price, dec!(7.70));
        assert_eq!(line.quantity, 3);
        assert_eq!(cart.len(), 1, "edit-in-place must not append a duplicate");
    }

    #[test]
    fn update_missing_line_fails() {
        let mut cart = Cart::new();
        let id = cart.add_line(&milk_tea(), ModifierSelection::default(), 1);
        cart.remove_line(id).unwrap();
        assert_eq!(
            cart.update_line(id, ModifierSelection::default()),
            Err(CartError::LineNotFound(id))
        );
    }

    #[test]
    fn decrement_at_one_requests_removal_without_mutating() {
        let mut cart = Cart::new();
        let id = cart.add_line(&milk_tea(), ModifierSelection::default(), 1);
        assert_eq!(cart.decrement(id), Ok(QuantityChange::RemovalRequested));
        assert_eq!(cart.line(id).unwrap().quantity, 1, "no silent removal");
    }

    #[test]
    fn quantity_changes() {
        let mut cart = Cart::new();
        let id = cart.add_line(&milk_tea(), ModifierSelection::default(), 1);
        assert_eq!(cart.increment(id), Ok(2));
        assert_eq!(cart.decrement(id), Ok(QuantityChange::Changed(1)));
    }

    #[test]
    fn removal_leaves_other_ids_valid() {
        let mut cart = Cart::new();
        let first = cart.add_line(&milk_tea(), ModifierSelection::default(), 1);
        let second = cart.add_line(&milk_tea(), large_with_toppings(), 2);
        let third = cart.add_line(&milk_tea(), ModifierSelection::default(), 1);

        cart.remove_line(first).unwrap();

        // The stale-index hazard of the positional model: ids held across a
        // removal still resolve to the same lines.
        assert_eq!(cart.line(second).unwrap().quantity, 2);
        assert!(cart.line(third).is_some());
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].id, second, "display order is preserved");
    }

    #[test]
    fn totals_match_published_example() {
        let mut cart = Cart::new();
        cart.add_line(&milk_tea(), large_with_toppings(), 2);

        let rate = TaxRate::from_percent(dec!(8.25)).unwrap();
        let totals = cart.totals(rate, None);
        assert_eq!(totals.subtotal, dec!(15.40));
        assert_eq!(totals.tax, dec!(1.27));
        assert_eq!(totals.total, dec!(16.67));
    }

    #[test]
    fn totals_respect_configured_rate() {
        let mut cart = Cart::new();
        cart.add_line(&milk_tea(), ModifierSelection::default(), 2);

        let cashier = cart
            .totals(TaxRate::from_percent(dec!(8.25)).unwrap(), None)
            .tax;
        let kiosk = cart
            .totals(TaxRate::from_percent(dec!(6.25)).unwrap(), None)
            .tax;
        assert_eq!(cashier, dec!(0.83));
        assert_eq!(kiosk, dec!(0.63));
    }

    #[test]
    fn subtotal_is_sum_of_line_totals() {
        let mut cart = Cart::new();
        cart.add_line(&milk_tea(), ModifierSelection::default(), 2);
        cart.add_line(&milk_tea(), large_with_toppings(), 1);

        let rate = TaxRate::from_percent(dec!(6.25)).unwrap();
        let expected: Decimal = cart.lines().iter().map(CartLine::line_total).sum();
        assert_eq!(cart.totals(rate, None).subtotal, expected);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_line(&milk_tea(), ModifierSelection::default(), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn serde_round_trip_preserves_cart() {
        // Serialization is what makes the cart durable across a page reload.
        let mut cart = Cart::new();
        cart.add_line(&milk_tea(), large_with_toppings(), 2);
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
