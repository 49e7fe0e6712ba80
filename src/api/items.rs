//! Catalog API endpoints
//!
//! - GET /items - Page through items with `skip` / `limit`
//! - POST /items - Add an item, echoing `price_with_tax` when taxed
//! - GET /items/search - Name search
//! - GET /items/filter - Price range and category filter
//! - GET /items/sort - Sorted listing
//! - GET /items/validate - Validated paged search

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::SmallPageQuery;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateItemInput, Item, ItemPage, SortBy};
use crate::services::CatalogServiceError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub min_price: f64,
    /// Unbounded when absent
    pub max_price: Option<f64>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort_by: SortBy,
    #[serde(default)]
    pub descending: bool,
}

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// Response for a newly added item
#[derive(Debug, Serialize)]
pub struct ItemCreatedResponse {
    pub message: String,
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_with_tax: Option<f64>,
}

/// Build the items router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/filter", get(filter_items))
        .route("/sort", get(sort_items))
        .route("/validate", get(validate_items))
}

fn catalog_error(e: CatalogServiceError) -> ApiError {
    match e {
        CatalogServiceError::ValidationError(msg) => ApiError::validation_error(msg),
    }
}

async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<SmallPageQuery>,
) -> Json<Vec<Item>> {
    Json(state.catalog_service.list(query.skip, query.limit).await)
}

async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<CreateItemInput>,
) -> Result<(StatusCode, Json<ItemCreatedResponse>), ApiError> {
    let item = state
        .catalog_service
        .create(body)
        .await
        .map_err(catalog_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ItemCreatedResponse {
            message: "Item created successfully".to_string(),
            price_with_tax: item.price_with_tax(),
            item,
        }),
    ))
}

async fn search_items(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Item>> {
    Json(state.catalog_service.search(query.q.as_deref()).await)
}

async fn filter_items(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<Item>> {
    Json(
        state
            .catalog_service
            .filter(
                query.min_price,
                query.max_price.unwrap_or(f64::INFINITY),
                query.category.as_deref(),
            )
            .await,
    )
}

async fn sort_items(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Json<Vec<Item>> {
    Json(state.catalog_service.sort(query.sort_by, query.descending).await)
}

async fn validate_items(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
) -> Result<Json<ItemPage>, ApiError> {
    let page = state
        .catalog_service
        .validated_page(query.page, query.size, query.search.as_deref())
        .await
        .map_err(catalog_error)?;
    Ok(Json(page))
}
