//! `OrderItem` entity - A single line of an order.
//!
//! `price_cents` is a snapshot taken at order time and is independent of the
//! live product price. Items are created atomically with their order and are
//! never edited afterwards. The product reference is nullable so that
//! removing a product keeps historical orders intact.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this item belongs to
    pub order_id: i64,
    /// ID of the ordered product, None if the product was later removed
    pub product_id: Option<i64>,
    /// Number of units ordered, at least 1
    pub quantity: i32,
    /// Unit price in cents, frozen at order time
    pub price_cents: i64,
}

impl Model {
    /// Line total in cents.
    #[must_use]
    pub const fn subtotal_cents(&self) -> i64 {
        self.price_cents * self.quantity as i64
    }
}

/// Defines relationships between `OrderItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
    /// Each item weakly references the ordered product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
