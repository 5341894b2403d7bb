//! # Routes
//!
//! HTTP handlers, one module per area:
//!
//! - [`items`] - catalog administration and browsing
//! - [`cart`] - the session cart
//! - [`orders`] - checkout and order administration

pub mod cart;
pub mod items;
pub mod orders;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/items", get(items::list_items).post(items::add_item))
        .route(
            "/items/{id}",
            put(items::update_item).delete(items::delete_item),
        )
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_to_cart))
        .route(
            "/cart/items/{id}",
            put(cart::set_quantity).delete(cart::remove_from_cart),
        )
        .route("/orders", get(orders::list_orders).post(orders::place_order))
        .route("/orders/counts", get(orders::status_counts))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", put(orders::update_status))
}
