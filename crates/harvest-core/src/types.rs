//! # Domain Types
//!
//! Catalog and order types shared by every crate in the workspace.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Order      │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (store)     │   │  id (store)     │   │  item_id        │       │
//! │  │  name           │   │  customer       │   │  quantity       │       │
//! │  │  category       │   │  status         │   │  price_per_unit │       │
//! │  │  price_cents    │   │  total_cents    │   │  (frozen)       │       │
//! │  │  unit           │   │  lines ─────────┼──►│                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────────────┐             │
//! │  │    Category     │   │          OrderStatus            │             │
//! │  │  vegetable      │   │  pending → in-progress →        │             │
//! │  │  fruit          │   │  delivered                      │             │
//! │  └─────────────────┘   └─────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An `OrderLine` copies the unit price at checkout, and `Order::total_cents`
//! is computed once at placement. Later catalog price changes never touch a
//! placed order.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Produce category of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Fruit,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Vegetable, Category::Fruit];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetable => "vegetable",
            Category::Fruit => "fruit",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.to_string()).collect(),
            })
    }
}

// =============================================================================
// Item
// =============================================================================

/// A purchasable catalog entry.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; everything
/// else comes from [`ItemFields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Unit label shown next to the price ("kg", "bunch", ...).
    pub unit: String,
    pub description: String,
    /// Image reference (URL or asset path).
    pub image: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Writable fields of an [`Item`], used by both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemFields {
    pub name: String,
    pub category: Category,
    pub price_cents: i64,
    pub unit: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl From<&Item> for ItemFields {
    fn from(item: &Item) -> Self {
        ItemFields {
            name: item.name.clone(),
            category: item.category,
            price_cents: item.price_cents,
            unit: item.unit.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment status of an order.
///
/// The intended lifecycle is `pending → in-progress → delivered`; whether
/// other moves are accepted is decided by the store's status policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "kebab-case"))]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Delivered,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// The next step of the forward lifecycle, `None` once delivered.
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InProgress),
            OrderStatus::InProgress => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Accepts `in-progress` as well as `in_progress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|s| s.to_string()).collect(),
            })
    }
}

// =============================================================================
// Status Policy
// =============================================================================

/// Which status changes the order store accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusPolicy {
    /// Any status may move to any other (admin override).
    #[default]
    Unrestricted,
    /// Only one step along `pending → in-progress → delivered`.
    ForwardOnly,
}

impl StatusPolicy {
    pub fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<(), ValidationError> {
        match self {
            StatusPolicy::Unrestricted => Ok(()),
            StatusPolicy::ForwardOnly if from.next() == Some(to) => Ok(()),
            StatusPolicy::ForwardOnly => Err(ValidationError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }
}

impl FromStr for StatusPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unrestricted" => Ok(StatusPolicy::Unrestricted),
            "forward-only" | "forward_only" => Ok(StatusPolicy::ForwardOnly),
            _ => Err(ValidationError::NotAllowed {
                field: "status policy".to_string(),
                allowed: vec!["unrestricted".to_string(), "forward-only".to_string()],
            }),
        }
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Contact block captured at checkout. All four fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of a placed order, with the unit price frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub item_id: String,
    pub quantity: i64,
    pub price_per_unit_cents: i64,
}

impl OrderLine {
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_per_unit_cents).times(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub lines: Vec<OrderLine>,
    pub customer: CustomerInfo,
    pub status: OrderStatus,
    /// Total in cents, fixed when the order was placed.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Sum of the frozen line prices. Equal to `total()` for every order
    /// assembled from a cart.
    pub fn lines_total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |sum, l| sum.saturating_add(l.quantity))
    }
}

/// An order as submitted to the store, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub lines: Vec<OrderLine>,
    pub customer: CustomerInfo,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Attaches the store-generated id. `updated_at` starts equal to
    /// `created_at`.
    pub fn into_order(self, id: impl Into<String>) -> Order {
        Order {
            id: id.into(),
            lines: self.lines,
            customer: self.customer,
            status: self.status,
            total_cents: self.total_cents,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Order counts per status, for the admin tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub delivered: usize,
}

impl StatusCounts {
    pub fn tally<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut counts = StatusCounts::default();
        for order in orders {
            match order.status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::InProgress => counts.in_progress += 1,
                OrderStatus::Delivered => counts.delivered += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.delivered
    }
}

/// Timestamp for a status change: `now` at microsecond precision, or one
/// microsecond past `previous` when the clock has not moved on.
pub fn next_update_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(6);
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order(status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: "order-1".to_string(),
            lines: vec![
                OrderLine {
                    item_id: "a".to_string(),
                    quantity: 5,
                    price_per_unit_cents: 199,
                },
                OrderLine {
                    item_id: "b".to_string(),
                    quantity: 3,
                    price_per_unit_cents: 399,
                },
            ],
            customer: CustomerInfo {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                address: "1 Orchard Lane".to_string(),
            },
            status,
            total_cents: 2192,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"delivered\"").unwrap(),
            OrderStatus::Delivered
        );
        assert_eq!(serde_json::to_string(&Category::Fruit).unwrap(), "\"fruit\"");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!(
            "in_progress".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProgress
        );
        assert_eq!(
            " In-Progress ".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProgress
        );
        assert!(matches!(
            "shipped".parse::<OrderStatus>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_status_lifecycle() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::InProgress));
        assert_eq!(OrderStatus::InProgress.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_status_policy() {
        let open = StatusPolicy::default();
        assert_eq!(open, StatusPolicy::Unrestricted);
        assert!(open.check(OrderStatus::Delivered, OrderStatus::Pending).is_ok());

        let strict: StatusPolicy = "forward-only".parse().unwrap();
        assert!(strict.check(OrderStatus::Pending, OrderStatus::InProgress).is_ok());
        assert!(strict.check(OrderStatus::InProgress, OrderStatus::Delivered).is_ok());
        assert!(matches!(
            strict.check(OrderStatus::Pending, OrderStatus::Delivered),
            Err(ValidationError::InvalidTransition { .. })
        ));
        assert!(strict.check(OrderStatus::Delivered, OrderStatus::Pending).is_err());
        assert!("sideways".parse::<StatusPolicy>().is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Fruit".parse::<Category>().unwrap(), Category::Fruit);
        assert!("mushroom".parse::<Category>().is_err());
    }

    #[test]
    fn test_order_totals() {
        let order = sample_order(OrderStatus::Pending);
        assert_eq!(order.lines_total(), order.total());
        assert_eq!(order.item_count(), 8);
    }

    #[test]
    fn test_status_counts() {
        let orders = vec![
            sample_order(OrderStatus::Pending),
            sample_order(OrderStatus::Pending),
            sample_order(OrderStatus::Delivered),
        ];
        let counts = StatusCounts::tally(&orders);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.in_progress, 0);
        assert_eq!(counts.delivered, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_next_update_timestamp_is_strictly_later() {
        let created = Utc::now().trunc_subsecs(6);
        assert!(next_update_timestamp(created, created) > created);
        assert!(next_update_timestamp(created, created - Duration::seconds(5)) > created);

        let later = created + Duration::seconds(1);
        assert_eq!(next_update_timestamp(created, later), later);

        // Sub-microsecond clock movement still yields a later timestamp.
        let nanos_later = created + Duration::nanoseconds(300);
        assert!(next_update_timestamp(created, nanos_later) > created);
    }

    #[test]
    fn test_new_order_into_order() {
        let template = sample_order(OrderStatus::Pending);
        let new_order = NewOrder {
            lines: template.lines.clone(),
            customer: template.customer.clone(),
            status: OrderStatus::Pending,
            total_cents: 2192,
            created_at: template.created_at,
        };
        let order = new_order.into_order("abc");
        assert_eq!(order.id, "abc");
        assert_eq!(order.created_at, order.updated_at);
        assert_eq!(order.lines.len(), 2);
    }
}
