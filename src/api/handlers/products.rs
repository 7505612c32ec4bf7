//! Catalog browsing handlers: featured rotation, filtered listing, detail,
//! and category drill-down.

use crate::{
    api::{
        AppState,
        pagination::{PageParams, PaginatedResponse},
        schemas,
    },
    core::catalog::{self, ProductFilter, ProductOrdering},
    entities::Category,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Query parameters of the main product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Category code filter
    pub category: Option<String>,
    /// Subcategory id filter
    pub subcategory: Option<i64>,
    /// Featured flag filter
    pub is_featured: Option<bool>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// Free-text search term
    pub search: Option<String>,
    /// Ordering field, `-` prefix for descending
    pub ordering: Option<String>,
    /// 1-based page number
    pub page: Option<u64>,
    /// Requested page size
    pub page_size: Option<u64>,
}

/// Query parameters of the category drill-down listing.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListQuery {
    /// Subcategory slug filter
    pub slug: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// 1-based page number
    pub page: Option<u64>,
    /// Requested page size
    pub page_size: Option<u64>,
}

/// `GET /api/products/featured/`
pub async fn featured_products(State(state): State<AppState>) -> Result<Json<Value>> {
    let featured = catalog::get_featured_products(&state.db).await?;
    let count = featured.len();
    let results =
        schemas::product_responses(&state.db, &state.config.media_base_url, featured).await?;

    Ok(Json(json!({
        "data": {
            "results": results,
            "count": count,
        }
    })))
}

/// `GET /api/products/`
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<PaginatedResponse<schemas::ProductResponse>>> {
    let category = match query.category.as_deref() {
        Some(code) => Some(Category::from_code(code).ok_or_else(|| Error::Validation {
            message: format!("Invalid category {code:?}"),
        })?),
        None => None,
    };

    let filter = ProductFilter {
        category,
        subcategory_id: query.subcategory,
        is_featured: query.is_featured,
        min_price: query.min_price,
        max_price: query.max_price,
        search: query.search,
        // Unknown ordering fields fall back to the default instead of erroring.
        ordering: query
            .ordering
            .as_deref()
            .and_then(ProductOrdering::parse)
            .unwrap_or_default(),
    };

    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };
    let page = catalog::list_products(&state.db, &filter, params.page(), params.page_size()).await?;
    let results =
        schemas::product_responses(&state.db, &state.config.media_base_url, page.items).await?;

    Ok(Json(PaginatedResponse::new(
        "/api/products/",
        page.page,
        page.page_size,
        page.total,
        results,
    )))
}

/// `GET /api/products/:id/`
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<schemas::ProductResponse>> {
    let product = catalog::get_product_by_id(&state.db, id)
        .await?
        .ok_or(Error::ProductNotFound { id })?;

    let response =
        schemas::product_response(&state.db, &state.config.media_base_url, product).await?;
    Ok(Json(response))
}

/// `GET /api/products/category/:category/`
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<PaginatedResponse<schemas::ProductResponse>>> {
    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };
    let path = format!("/api/products/category/{category}/");

    // An unknown category code matches nothing rather than erroring, same as
    // an unknown slug.
    let Some(category) = Category::from_code(&category) else {
        return Ok(Json(PaginatedResponse::new(
            &path,
            params.page(),
            params.page_size(),
            0,
            Vec::new(),
        )));
    };

    let page = catalog::list_products_by_category(
        &state.db,
        category,
        query.slug.as_deref(),
        query.min_price,
        query.max_price,
        params.page(),
        params.page_size(),
    )
    .await?;
    let results =
        schemas::product_responses(&state.db, &state.config.media_base_url, page.items).await?;

    Ok(Json(PaginatedResponse::new(
        &path,
        page.page,
        page.page_size,
        page.total,
        results,
    )))
}
