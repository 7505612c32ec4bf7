//! Order entity - A customer's checkout, tracked through its payment lifecycle.
//!
//! Orders are created with status `PENDING` and move to `COMPLETED` or
//! `FAILED` when the gateway confirms or rejects the charge, either through
//! the synchronous confirmation endpoint or through a webhook. `REFUNDED`
//! exists in the enum but is only ever set by an out-of-band operation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order. Stored as its uppercase code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Order created but not paid
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Payment received, being prepared
    #[sea_orm(string_value = "PROCESSING")]
    Processing,
    /// Order fulfilled
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Payment or processing failed
    #[sea_orm(string_value = "FAILED")]
    Failed,
    /// Money returned to customer
    #[sea_orm(string_value = "REFUNDED")]
    Refunded,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Generated unique reference (e.g., "ORD-1A2B3C4D")
    #[sea_orm(unique)]
    pub order_number: String,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Total in cents - the smallest currency unit the gateway charges in
    pub total_amount_cents: i64,
    /// The gateway's payment-intent reference for this order
    pub stripe_payment_intent_id: Option<String>,
    /// When the order was created
    pub created_at: DateTime,
    /// When the order was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order owns many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
    /// One order owns many payment records
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
