//! Subcategory entity - Second-level catalog grouping under a fixed category.
//!
//! Subcategories are soft-deleted: destroy operations set `is_active = false`
//! and keep the row, so existing products retain their reference until it is
//! explicitly cleared.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subcategory database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subcategories")]
pub struct Model {
    /// Unique identifier for the subcategory
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "TV & Home Theater")
    pub name: String,
    /// URL-friendly unique identifier (e.g., "tv-home-theater")
    #[sea_orm(unique)]
    pub slug: String,
    /// Top-level category this subcategory belongs to
    pub category: super::product::Category,
    /// Optional free-text description
    pub description: String,
    /// Soft delete flag - inactive subcategories are hidden from listings
    pub is_active: bool,
    /// When the subcategory was created
    pub created_at: DateTime,
    /// When the subcategory was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Subcategory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One subcategory has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
