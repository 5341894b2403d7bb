//! # Application State
//!
//! Shared by every handler through axum's `State` extractor.
//!
//! ## Session Cart
//! The storefront serves a single session cart. It sits behind a
//! `tokio::sync::Mutex` so the lock can be held across the `place_order`
//! await; two checkouts can never submit the same cart.

use std::sync::Arc;

use harvest_core::Cart;
use harvest_store::Storefront;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Storefront,
    pub cart: Arc<Mutex<Cart>>,
}

impl AppState {
    pub fn new(store: Storefront) -> Self {
        AppState {
            store,
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }
}
