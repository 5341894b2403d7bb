//! # Cart
//!
//! The session cart: an owned list of (item, quantity) lines whose total is
//! always derived, never stored.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Method                  Effect                │
//! │  ──────────────           ──────                  ──────                │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item(item, n) ────► qty += n or push     │
//! │                                                                         │
//! │  Change quantity ───────► set_quantity(id, n) ──► qty = n (n ≤ 0: drop)│
//! │                                                                         │
//! │  Remove ────────────────► remove_item(id) ──────► retain others        │
//! │                                                                         │
//! │  Checkout succeeded ────► clear() ──────────────► lines.clear()        │
//! │                                                                         │
//! │  Any render ────────────► total() ──────────────► Σ price × qty        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is never global state: whoever owns the shopping session owns
//! the `Cart` and passes `&mut Cart` to checkout.
//!
//! ## Invariants
//! - Lines are unique by item id (adding again increases the quantity)
//! - Every line has quantity >= 1
//! - No upper bound on quantity or line count, other than that every line
//!   total, the cart total and the total quantity fit in an `i64`. A change
//!   that would break this is refused like a non-positive quantity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Item, OrderLine};

/// A line in the cart.
///
/// `item` is the catalog entry as it was when added. Checkout snapshots
/// `item.price_cents` into the order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item: Item,
    pub quantity: i64,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    #[inline]
    pub fn item_id(&self) -> &str {
        &self.item.id
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.item.price().times(self.quantity)
    }

    /// Freezes this line into an order line.
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            item_id: self.item.id.clone(),
            quantity: self.quantity,
            price_per_unit_cents: self.item.price_cents,
        }
    }
}

/// Acknowledgment returned by [`Cart::add_item`], suitable for an
/// "Added to cart" notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartAck {
    pub item_id: String,
    pub item_name: String,
    /// Quantity added by this call.
    pub added: i64,
    /// Line quantity after the call.
    pub line_quantity: i64,
}

impl CartAck {
    pub fn message(&self) -> String {
        format!("{} {} added to your cart", self.added, self.item_name)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds `quantity` of `item`, merging with an existing line.
    ///
    /// Returns `None` and leaves the cart untouched when `quantity < 1` or
    /// when the totals would overflow.
    pub fn add_item(&mut self, item: &Item, quantity: i64) -> Option<CartAck> {
        if quantity < 1 {
            return None;
        }

        // A merged line keeps the price it was first added at.
        let price = self
            .lines
            .iter()
            .find(|l| l.item.id == item.id)
            .map_or(item.price(), |l| l.item.price());
        let line_quantity = self.quantity_of(&item.id).checked_add(quantity)?;
        if !self.totals_fit(&item.id, price, line_quantity) {
            return None;
        }

        match self.lines.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => line.quantity = line_quantity,
            None => {
                self.lines.push(CartLine {
                    item: item.clone(),
                    quantity,
                    added_at: Utc::now(),
                });
            }
        }

        Some(CartAck {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            added: quantity,
            line_quantity,
        })
    }

    /// Removes the line for `item_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item.id != item_id);
        self.lines.len() != before
    }

    /// Sets the quantity of an existing line.
    ///
    /// `quantity <= 0` removes the line. Unknown ids are ignored, and so is
    /// a quantity whose totals would overflow. Returns whether the cart
    /// changed.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(item_id);
        }

        let Some(price) = self
            .lines
            .iter()
            .find(|l| l.item.id == item_id)
            .map(|l| l.item.price())
        else {
            return false;
        };
        if !self.totals_fit(item_id, price, quantity) {
            return false;
        }

        match self.lines.iter_mut().find(|l| l.item.id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Whether every total stays within `i64` once `item_id` holds
    /// `quantity` at `price`.
    fn totals_fit(&self, item_id: &str, price: Money, quantity: i64) -> bool {
        let Some(own_total) = price.checked_times(quantity) else {
            return false;
        };

        self.lines
            .iter()
            .filter(|l| l.item.id != item_id)
            .try_fold((own_total, quantity), |(total, count), line| {
                let line_total = line.item.price().checked_times(line.quantity)?;
                Some((total.checked_add(line_total)?, count.checked_add(line.quantity)?))
            })
            .is_some()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Quantity held for `item_id`, 0 if absent.
    pub fn quantity_of(&self, item_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.item.id == item_id)
            .map_or(0, |l| l.quantity)
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |sum, l| sum.saturating_add(l.quantity))
    }

    /// Σ unit price × quantity over every line.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Order lines in cart order, prices frozen at this moment.
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines.iter().map(CartLine::to_order_line).collect()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSummary {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total().cents(),
        }
    }
}
