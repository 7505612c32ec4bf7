//! Shared test utilities for the storefront backend.
//!
//! This module provides common helper functions for setting up test
//! databases, creating test entities with sensible defaults, and a scripted
//! mock of the payment gateway.

use crate::{
    core::{catalog, catalog::NewProduct, subcategory, subcategory::NewSubcategory},
    entities::{Category, product, subcategory as subcategory_entity},
    errors::{Error, Result},
    gateway::{IntentStatus, PaymentGateway, PaymentIntent},
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Mutex;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a valid [`NewProduct`] with sensible defaults.
///
/// # Defaults
/// * `category`: Electronics
/// * `price`: 19.99
/// * `rating`: 4.0
/// * not featured, no subcategory, no descriptions
#[must_use]
pub fn test_product_input(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: Category::Electronics,
        subcategory_id: None,
        price: 19.99,
        description: None,
        short_description: None,
        meta_description: None,
        image_path: None,
        rating: 4.0,
        is_featured: false,
    }
}

/// Creates a test product with sensible defaults.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<product::Model> {
    catalog::create_product(db, test_product_input(name)).await
}

/// Creates a test product with custom category, price, and featured flag.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    category: Category,
    price: f64,
    is_featured: bool,
) -> Result<product::Model> {
    let mut input = test_product_input(name);
    input.category = category;
    input.price = price;
    input.is_featured = is_featured;
    catalog::create_product(db, input).await
}

/// Creates a test subcategory in the Electronics category.
pub async fn create_test_subcategory(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<subcategory_entity::Model> {
    create_custom_subcategory(db, name, slug, Category::Electronics).await
}

/// Creates a test subcategory with a custom category.
pub async fn create_custom_subcategory(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
    category: Category,
) -> Result<subcategory_entity::Model> {
    subcategory::create_subcategory(
        db,
        NewSubcategory {
            name: name.to_string(),
            slug: slug.to_string(),
            category,
            description: None,
        },
    )
    .await
}

/// Scripted [`PaymentGateway`] double.
///
/// Created intents are recorded so tests can assert on the charged amounts;
/// retrieval reports `retrieve_status` for any intent id.
pub struct MockGateway {
    /// Whether `create_payment_intent` fails with a gateway error
    pub fail_create: bool,
    /// Whether `retrieve_payment_intent` fails with a gateway error
    pub fail_retrieve: bool,
    /// Status reported for retrieved intents
    pub retrieve_status: IntentStatus,
    created: Mutex<Vec<PaymentIntent>>,
}

impl MockGateway {
    /// A gateway where creation works and every retrieved intent succeeded.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::with_retrieve_status(IntentStatus::Succeeded)
    }

    /// A gateway whose creation calls fail, as if unreachable.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            fail_retrieve: true,
            retrieve_status: IntentStatus::Succeeded,
            created: Mutex::new(Vec::new()),
        }
    }

    /// A working gateway whose retrieved intents report `status`.
    #[must_use]
    pub fn with_retrieve_status(status: IntentStatus) -> Self {
        Self {
            fail_create: false,
            fail_retrieve: false,
            retrieve_status: status,
            created: Mutex::new(Vec::new()),
        }
    }

    /// Amounts of every intent created through this mock, in call order.
    ///
    /// # Panics
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn created_amounts(&self) -> Vec<i64> {
        self.created
            .lock()
            .expect("mock gateway lock")
            .iter()
            .map(|intent| intent.amount_cents)
            .collect()
    }

    fn find_created(&self, payment_intent_id: &str) -> Option<PaymentIntent> {
        self.created
            .lock()
            .expect("mock gateway lock")
            .iter()
            .find(|intent| intent.id == payment_intent_id)
            .cloned()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_payment_intent(
        &self,
        amount_cents: i64,
        _currency: &str,
        order_number: &str,
    ) -> Result<PaymentIntent> {
        if self.fail_create {
            return Err(Error::Gateway {
                message: "gateway unreachable".to_string(),
            });
        }
        let intent = PaymentIntent {
            id: format!("pi_{}", order_number.to_lowercase().replace('-', "_")),
            client_secret: Some(format!("pi_{order_number}_secret_test")),
            amount_cents,
            status: IntentStatus::RequiresPaymentMethod,
        };
        self.created
            .lock()
            .expect("mock gateway lock")
            .push(intent.clone());
        Ok(intent)
    }

    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> Result<PaymentIntent> {
        if self.fail_retrieve {
            return Err(Error::Gateway {
                message: "gateway unreachable".to_string(),
            });
        }
        let amount_cents = self
            .find_created(payment_intent_id)
            .map_or(0, |intent| intent.amount_cents);
        Ok(PaymentIntent {
            id: payment_intent_id.to_string(),
            client_secret: None,
            amount_cents,
            status: self.retrieve_status,
        })
    }
}
