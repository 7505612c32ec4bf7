//! `NewsletterSubscriber` entity - Captured newsletter signups.
//!
//! Email uniqueness is enforced by a storage-layer constraint rather than a
//! pre-check, so concurrent duplicate signups surface as a constraint
//! violation instead of racing past an existence check.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Newsletter subscriber database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "newsletter_subscribers")]
pub struct Model {
    /// Unique identifier for the subscriber
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Subscriber email, unique across the table
    #[sea_orm(unique)]
    pub email: String,
    /// When the subscription was created
    pub date_subscribed: DateTimeUtc,
    /// Whether the subscription is active
    pub is_active: bool,
}

/// Defines relationships between `NewsletterSubscriber` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
