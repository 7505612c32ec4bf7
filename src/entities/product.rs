//! Product entity - Represents items offered in the catalog.
//!
//! Each product belongs to one of the fixed top-level categories and may
//! reference an optional subcategory. Prices are stored as decimal dollars;
//! order snapshots use cents (see [`super::order_item`]). Products are never
//! hard-deleted, `is_active` flags them out instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level product category. Stored as its four-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(4))")]
pub enum Category {
    /// Consumer electronics
    #[sea_orm(string_value = "ELEC")]
    #[serde(rename = "ELEC")]
    Electronics,
    /// Food and groceries
    #[sea_orm(string_value = "FOOD")]
    #[serde(rename = "FOOD")]
    Food,
}

impl Category {
    /// Parses a category from its wire code (`"ELEC"`, `"FOOD"`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ELEC" => Some(Self::Electronics),
            "FOOD" => Some(Self::Food),
            _ => None,
        }
    }

    /// The wire code stored in the database and used in URLs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Electronics => "ELEC",
            Self::Food => "FOOD",
        }
    }
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, 2 to 100 characters
    pub name: String,
    /// Top-level category code
    pub category: Category,
    /// Optional subcategory reference, cleared if the subcategory is removed
    pub subcategory_id: Option<i64>,
    /// Price in dollars, strictly positive
    pub price: f64,
    /// Full description, at least 10 characters when present
    pub description: Option<String>,
    /// Brief summary for listings and cards
    pub short_description: Option<String>,
    /// SEO meta description
    pub meta_description: Option<String>,
    /// Object-storage key of the main image; the API serves a URL built from it
    pub image_path: Option<String>,
    /// Average rating on a 0 to 5 scale
    pub rating: f64,
    /// Whether the product appears in the featured rotation
    pub is_featured: bool,
    /// Whether this product is active and should be displayed
    pub is_active: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product may belong to one subcategory
    #[sea_orm(
        belongs_to = "super::subcategory::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategory::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Subcategory,
    /// One product has many additional images
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
}

impl Related<super::subcategory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
