//! Payment entity - The record of a gateway charge attempt against an order.
//!
//! A payment row is created once the gateway confirms or denies the charge;
//! `amount_cents` mirrors the gateway-reported amount, not the locally
//! computed total. Rows are immutable after creation except for status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome status of a payment. Stored as its uppercase code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Payment initiated
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Payment successful
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Payment failed
    #[sea_orm(string_value = "FAILED")]
    Failed,
    /// Payment refunded
    #[sea_orm(string_value = "REFUNDED")]
    Refunded,
}

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order being paid for
    pub order_id: i64,
    /// Charged amount in cents, as reported by the gateway
    pub amount_cents: i64,
    /// Outcome of the charge
    pub status: PaymentStatus,
    /// The gateway's payment-intent reference
    pub stripe_payment_intent_id: String,
    /// The gateway's payment-method reference (card, wallet, ...)
    pub stripe_payment_method_id: String,
    /// When the payment record was created
    pub created_at: DateTime,
    /// When the payment record was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
