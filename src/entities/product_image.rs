//! `ProductImage` entity - Additional gallery images attached to a product.
//!
//! At most one image per product may carry `is_primary = true`; saving a new
//! primary clears the flag on its siblings in the same transaction (see
//! `core::catalog`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product image database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    /// Unique identifier for the image
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this image belongs to
    pub product_id: i64,
    /// Object-storage key of the image file
    pub image_path: String,
    /// Whether this is the product's primary image
    pub is_primary: bool,
    /// Descriptive text for accessibility
    pub alt_text: Option<String>,
}

/// Defines relationships between `ProductImage` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each image belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
