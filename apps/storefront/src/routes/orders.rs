//! # Order Routes
//!
//! ```text
//! POST /orders                  checkout the session cart      (201)
//! GET  /orders[?status=...]     admin list, newest first
//! GET  /orders/counts           admin tab badges
//! GET  /orders/{id}             order detail
//! PUT  /orders/{id}/status      admin status change
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use harvest_core::{CustomerInfo, Order, OrderStatus, StatusCounts};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer: CustomerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Places an order for the session cart.
///
/// The cart lock is held until the store answers, and the cart is only
/// emptied when the order was stored.
pub async fn place_order(
    State(state): State<AppState>,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PlaceOrderResponse>)> {
    let Json(request) = body?;

    let mut cart = state.cart.lock().await;
    debug!(lines = cart.len(), "place_order");
    let order_id = state
        .store
        .checkout()
        .place_order(&mut cart, request.customer)
        .await?;

    Ok((StatusCode::CREATED, Json(PlaceOrderResponse { order_id })))
}

pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<OrderQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Order>>> {
    let Query(query) = query?;
    debug!(status = ?query.status, "list_orders");

    let orders = match query.status.as_deref() {
        Some(raw) => {
            let status: OrderStatus = raw.parse()?;
            state.store.orders().list_orders_by_status(status).await?
        }
        None => state.store.orders().list_orders().await?,
    };
    Ok(Json(orders))
}

pub async fn status_counts(State(state): State<AppState>) -> ApiResult<Json<StatusCounts>> {
    Ok(Json(state.store.orders().status_counts().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    state
        .store
        .orders()
        .get_order_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Order", &id))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult<Json<Order>> {
    let Json(request) = body?;
    let status: OrderStatus = request.status.parse()?;

    let order = state.store.orders().update_status(&id, status).await?;
    Ok(Json(order))
}
