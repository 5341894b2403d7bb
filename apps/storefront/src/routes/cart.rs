//! # Cart Routes
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  form    │     │ pending  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │               POST /cart/items     POST /orders                         │
//! │               PUT  /cart/items/{id}  (orders.rs)                        │
//! │               DELETE /cart/items/{id}                                   │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                  DELETE /cart ─────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every route answers with the full cart so the UI can redraw from it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use harvest_core::{Cart, CartAck, CartLine, CartSummary};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// One cart line as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineResponse {
    pub item_id: String,
    pub name: String,
    pub unit: String,
    pub price_per_unit_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

impl From<&CartLine> for CartLineResponse {
    fn from(line: &CartLine) -> Self {
        CartLineResponse {
            item_id: line.item.id.clone(),
            name: line.item.name.clone(),
            unit: line.item.unit.clone(),
            price_per_unit_cents: line.item.price_cents,
            quantity: line.quantity,
            line_total_cents: line.line_total().cents(),
        }
    }
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub summary: CartSummary,
    /// `cart_total` formatted for display, e.g. `$21.92`
    pub total: String,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().iter().map(CartLineResponse::from).collect(),
            summary: cart.summary(),
            total: cart.total().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToCartResponse {
    /// Absent when nothing was added: the quantity was not positive, or the
    /// cart totals would overflow.
    pub ack: Option<CartAck>,
    pub message: Option<String>,
    pub cart: CartResponse,
}

pub async fn get_cart(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart.lock().await;
    Json(CartResponse::from(&*cart))
}

/// Resolves the item in the catalog, then adds it with its current price.
pub async fn add_to_cart(
    State(state): State<AppState>,
    body: Result<Json<AddToCartRequest>, JsonRejection>,
) -> ApiResult<Json<AddToCartResponse>> {
    let Json(request) = body?;
    debug!(item_id = %request.item_id, quantity = request.quantity, "add_to_cart");

    let item = state
        .store
        .catalog()
        .get_item(&request.item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item", &request.item_id))?;

    let mut cart = state.cart.lock().await;
    let ack = cart.add_item(&item, request.quantity);
    Ok(Json(AddToCartResponse {
        message: ack.as_ref().map(CartAck::message),
        ack,
        cart: CartResponse::from(&*cart),
    }))
}

/// `quantity <= 0` removes the line.
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    body: Result<Json<SetQuantityRequest>, JsonRejection>,
) -> ApiResult<Json<CartResponse>> {
    let Json(request) = body?;
    debug!(item_id = %item_id, quantity = request.quantity, "set_quantity");

    let mut cart = state.cart.lock().await;
    cart.set_quantity(&item_id, request.quantity);
    Ok(Json(CartResponse::from(&*cart)))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Json<CartResponse> {
    debug!(item_id = %item_id, "remove_from_cart");
    let mut cart = state.cart.lock().await;
    cart.remove_item(&item_id);
    Json(CartResponse::from(&*cart))
}

pub async fn clear_cart(State(state): State<AppState>) -> Json<CartResponse> {
    debug!("clear_cart");
    let mut cart = state.cart.lock().await;
    cart.clear();
    Json(CartResponse::from(&*cart))
}
