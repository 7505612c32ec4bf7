//! Subcategory CRUD handlers. DELETE is a soft delete: the row is kept and
//! flagged inactive.

use crate::{
    api::{AppState, schemas::SubcategoryResponse},
    core::subcategory::{self, NewSubcategory, SubcategoryPatch},
    entities::Category,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Query parameters of the subcategory listing.
#[derive(Debug, Default, Deserialize)]
pub struct SubcategoryListQuery {
    /// Category code filter
    pub category: Option<String>,
    /// Free-text search over name and description
    pub search: Option<String>,
}

/// Creation payload.
#[derive(Debug, Deserialize)]
pub struct CreateSubcategoryRequest {
    /// Display name
    pub name: String,
    /// URL slug, lowercase-kebab
    pub slug: String,
    /// Category code ("ELEC", "FOOD")
    pub category: String,
    /// Optional description
    pub description: Option<String>,
}

/// Partial-update payload; absent fields stay untouched.
#[derive(Debug, Default, Deserialize)]
pub struct PatchSubcategoryRequest {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category code
    pub category: Option<String>,
    /// Re-activate or deactivate
    pub is_active: Option<bool>,
}

fn parse_category(code: &str) -> Result<Category> {
    Category::from_code(code).ok_or_else(|| Error::Validation {
        message: format!("Invalid category {code:?}"),
    })
}

/// `GET /api/subcategories/`
pub async fn list_subcategories(
    State(state): State<AppState>,
    Query(query): Query<SubcategoryListQuery>,
) -> Result<Json<Vec<SubcategoryResponse>>> {
    let category = match query.category.as_deref() {
        Some(code) => Some(parse_category(code)?),
        None => None,
    };
    let subcategories =
        subcategory::list_active_subcategories(&state.db, category, query.search.as_deref())
            .await?;
    Ok(Json(
        subcategories
            .into_iter()
            .map(SubcategoryResponse::from)
            .collect(),
    ))
}

/// `POST /api/subcategories/`
pub async fn create_subcategory(
    State(state): State<AppState>,
    Json(body): Json<CreateSubcategoryRequest>,
) -> Result<(StatusCode, Json<SubcategoryResponse>)> {
    let category = parse_category(&body.category)?;
    let created = subcategory::create_subcategory(
        &state.db,
        NewSubcategory {
            name: body.name,
            slug: body.slug,
            category,
            description: body.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /api/subcategories/detail/:slug/`
pub async fn subcategory_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SubcategoryResponse>> {
    let subcategory = subcategory::get_subcategory_by_slug(&state.db, &slug)
        .await?
        .ok_or(Error::SubcategoryNotFound { slug })?;
    Ok(Json(subcategory.into()))
}

/// `PATCH /api/subcategories/detail/:slug/`
pub async fn patch_subcategory(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<PatchSubcategoryRequest>,
) -> Result<Json<SubcategoryResponse>> {
    let category = match body.category.as_deref() {
        Some(code) => Some(parse_category(code)?),
        None => None,
    };
    let updated = subcategory::update_subcategory(
        &state.db,
        &slug,
        SubcategoryPatch {
            name: body.name,
            description: body.description,
            category,
            is_active: body.is_active,
        },
    )
    .await?;
    Ok(Json(updated.into()))
}

/// `DELETE /api/subcategories/detail/:slug/` - soft delete.
pub async fn delete_subcategory(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode> {
    subcategory::deactivate_subcategory(&state.db, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
