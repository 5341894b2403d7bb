//! # Catalog Routes
//!
//! ```text
//! GET    /items[?category=fruit]   list, newest first
//! POST   /items                    create   (201)
//! PUT    /items/{id}               update
//! DELETE /items/{id}               delete   (204)
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use harvest_core::{Category, Item, ItemFields};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub category: Option<String>,
}

pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Item>>> {
    let Query(query) = query?;
    debug!(category = ?query.category, "list_items");

    let items = match query.category.as_deref() {
        Some(raw) => {
            let category: Category = raw.parse()?;
            state.store.catalog().list_items_by_category(category).await?
        }
        None => state.store.catalog().list_items().await?,
    };
    Ok(Json(items))
}

pub async fn add_item(
    State(state): State<AppState>,
    body: Result<Json<ItemFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(fields) = body?;
    let item = state.store.catalog().add_item(fields).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ItemFields>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(fields) = body?;
    let item = state.store.catalog().update_item(&id, fields).await?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.catalog().delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
