//! Item endpoints
//!
//! `/items` lists and creates; `/items/{id}` reads, replaces and deletes one
//! row by primary key.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{ItemRecord, ItemRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ItemId, JsonBody};
use crate::http::server::AppState;
use crate::models::{text_field, Category, NewItem, SortKey, ValidationError};

/// Query parameters for GET /items
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsParams {
    pub curriculum: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Create/replace item request
///
/// Missing and `null` fields decode as `None` and are stored as empty
/// strings; a missing or `null` `category` is then rejected by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemRequest {
    pub category: Option<String>,
    pub curriculum: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub made_day: Option<String>,
}

impl TryFrom<ItemRequest> for NewItem {
    type Error = ValidationError;

    fn try_from(req: ItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            category: Category::new(req.category.as_deref().unwrap_or_default())?,
            curriculum: text_field("curriculum", req.curriculum)?,
            title: text_field("title", req.title)?,
            link: text_field("link", req.link)?,
            summary: text_field("summary", req.summary)?,
            made_day: text_field("made_day", req.made_day)?,
        })
    }
}

/// Item response
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub category: String,
    pub curriculum: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub made_day: String,
    pub updated_day: Option<String>,
}

impl From<ItemRecord> for ItemResponse {
    fn from(item: ItemRecord) -> Self {
        Self {
            id: item.id.to_string(),
            category: item.category,
            curriculum: item.curriculum,
            title: item.title,
            link: item.link,
            summary: item.summary,
            made_day: item.made_day,
            updated_day: item.updated_day.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Response for a successful create
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// GET /items - list items, optionally filtered and sorted
async fn list_items(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListItemsParams>, QueryRejection>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let Query(params) = query?;
    let sort = SortKey::from_params(params.sort.as_deref(), params.order.as_deref())?;
    let curriculum = params.curriculum.as_deref().filter(|c| !c.is_empty());

    let items = ItemRepo::new(&state.pool).list(curriculum, sort).await?;
    tracing::debug!(count = items.len(), ?curriculum, %sort, "listed items");

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// POST /items - create a new item
async fn create_item(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ItemRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let item = NewItem::try_from(req)?;
    let id = ItemRepo::new(&state.pool).create(&item).await?;
    tracing::info!(%id, category = item.category.as_str(), "item created");

    Ok((
        StatusCode::ACCEPTED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

/// GET /items/{id} - get a single item
async fn get_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = ItemRepo::new(&state.pool).get(id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// PUT /items/{id} - replace an item's fields
async fn update_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
    JsonBody(req): JsonBody<ItemRequest>,
) -> Result<StatusCode, ApiError> {
    let item = NewItem::try_from(req)?;
    ItemRepo::new(&state.pool).update(id, &item).await?;
    tracing::info!(%id, "item updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /items/{id} - delete an item
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> Result<StatusCode, ApiError> {
    ItemRepo::new(&state.pool).delete(id).await?;
    tracing::info!(%id, "item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
