//! # Order Assembler
//!
//! Turns a cart and a contact block into a placed order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(&mut cart, customer)                                      │
//! │       │                                                                 │
//! │       ├── cart empty?         ──► Validation(EmptyCart)                │
//! │       ├── customer invalid?   ──► Validation(field)                    │
//! │       │        (no backend call on either path)                         │
//! │       │                                                                 │
//! │       ├── NewOrder { lines: price snapshots, total: cart.total(),      │
//! │       │              status: pending }                                  │
//! │       │                                                                 │
//! │       ├── backend.insert_order  ──► Err: Persistence, cart untouched   │
//! │       │                                                                 │
//! │       └── Ok: cart.clear(), OrderPlaced event, return order id         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use harvest_core::validation::validate_customer_info;
use harvest_core::{Cart, CustomerInfo, NewOrder, OrderStatus, ValidationError};
use tracing::{debug, info, warn};

use crate::backend::SharedBackend;
use crate::error::StoreResult;
use crate::events::{EventBus, StoreEvent};

#[derive(Clone)]
pub struct OrderAssembler {
    backend: SharedBackend,
    events: EventBus,
}

impl OrderAssembler {
    pub fn new(backend: SharedBackend, events: EventBus) -> Self {
        OrderAssembler { backend, events }
    }

    /// Places an order for everything in `cart` and returns its id.
    ///
    /// The cart is cleared only once the order has been stored.
    pub async fn place_order(&self, cart: &mut Cart, customer: CustomerInfo) -> StoreResult<String> {
        if cart.is_empty() {
            warn!("Rejected checkout of an empty cart");
            return Err(ValidationError::EmptyCart.into());
        }

        let customer = trim_customer(customer);
        if let Err(e) = validate_customer_info(&customer) {
            warn!(error = %e, "Rejected checkout");
            return Err(e.into());
        }

        let new_order = NewOrder {
            lines: cart.to_order_lines(),
            customer,
            status: OrderStatus::Pending,
            total_cents: cart.total().cents(),
            created_at: Utc::now(),
        };
        debug!(
            lines = new_order.lines.len(),
            total_cents = new_order.total_cents,
            "Submitting order"
        );

        let order = self.backend.insert_order(&new_order).await?;
        cart.clear();

        info!(order_id = %order.id, total = %order.total(), "Order placed");
        self.events.publish(StoreEvent::OrderPlaced {
            order_id: order.id.clone(),
            total_cents: order.total_cents,
        });
        Ok(order.id)
    }
}

fn trim_customer(customer: CustomerInfo) -> CustomerInfo {
    CustomerInfo {
        name: customer.name.trim().to_string(),
        email: customer.email.trim().to_string(),
        phone: customer.phone.trim().to_string(),
        address: customer.address.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::MemoryBackend;
    use crate::orders::OrderStatusStore;
    use harvest_core::{Category, Item, StatusPolicy};

    fn item(id: &str, name: &str, price_cents: i64) -> Item {
        let now = Utc::now();
        Item {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Vegetable,
            price_cents,
            unit: "kg".to_string(),
            description: String::new(),
            image: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Orchard Lane".to_string(),
        }
    }

    fn setup() -> (OrderAssembler, OrderStatusStore, Arc<MemoryBackend>, EventBus) {
        let backend = Arc::new(MemoryBackend::new());
        let events = EventBus::default();
        let assembler = OrderAssembler::new(backend.clone(), events.clone());
        let orders = OrderStatusStore::new(backend.clone(), events.clone(), StatusPolicy::default());
        (assembler, orders, backend, events)
    }

    #[tokio::test]
    async fn test_place_order_totals_and_clears_cart() {
        let (assembler, orders, _, events) = setup();
        let mut rx = events.subscribe();

        let mut cart = Cart::new();
        cart.add_item(&item("a", "Fresh Carrots", 199), 5);
        cart.add_item(&item("b", "Green Apples", 399), 3);

        let id = assembler.place_order(&mut cart, customer()).await.unwrap();
        assert!(cart.is_empty());

        let order = orders.get_order_by_id(&id).await.unwrap().unwrap();
        assert_eq!(order.total_cents, 2192);
        assert_eq!(order.total().to_string(), "$21.92");
        assert_eq!(order.lines_total(), order.total());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer.name, "Ada Lovelace");
        assert_eq!(order.lines[0].item_id, "a");
        assert_eq!(order.lines[1].quantity, 3);

        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::OrderPlaced {
                order_id: id,
                total_cents: 2192
            }
        );
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let (assembler, _, backend, _) = setup();
        let mut cart = Cart::new();

        let err = assembler.place_order(&mut cart, customer()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::StoreError::Validation(ValidationError::EmptyCart)
        ));
        assert_eq!(backend.order_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_customer_keeps_cart() {
        let (assembler, _, backend, _) = setup();
        let mut cart = Cart::new();
        cart.add_item(&item("a", "Fresh Carrots", 199), 1);

        let mut bad = customer();
        bad.email = "not-an-email".to_string();
        assert!(assembler.place_order(&mut cart, bad).await.unwrap_err().is_validation());

        let mut blank = customer();
        blank.address = "   ".to_string();
        assert!(assembler.place_order(&mut cart, blank).await.unwrap_err().is_validation());

        assert_eq!(cart.len(), 1);
        assert_eq!(backend.order_count().await, 0);
    }

    #[tokio::test]
    async fn test_backend_failure_leaves_cart_intact() {
        let (assembler, _, backend, events) = setup();
        let mut rx = events.subscribe();
        let mut cart = Cart::new();
        cart.add_item(&item("a", "Fresh Carrots", 199), 2);

        backend.set_unavailable(true);
        let err = assembler.place_order(&mut cart, customer()).await.unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(cart.quantity_of("a"), 2);
        assert!(rx.try_recv().is_err());

        backend.set_unavailable(false);
        assembler.place_order(&mut cart, customer()).await.unwrap();
        assert!(cart.is_empty());
    }
}
