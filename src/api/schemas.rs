//! JSON response shapes and their assembly from entity models.
//!
//! The catalog is stored with object-storage keys, never file contents, so
//! serialization turns each key into an absolute URL against the configured
//! media base. Product serialization embeds the subcategory and gallery
//! images; list assembly batch-loads both to avoid per-row queries.

use crate::{
    core::{catalog, subcategory},
    entities::{
        Category, OrderStatus, PaymentStatus, order, order_item, payment, product, product_image,
        subcategory as subcategory_entity,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use sea_orm::prelude::DateTime;
use serde::Serialize;
use std::collections::HashMap;

/// Joins the configured media base with a stored object key.
#[must_use]
pub fn media_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Serialized gallery image.
#[derive(Debug, Clone, Serialize)]
pub struct ProductImageResponse {
    /// Image id
    pub id: i64,
    /// Absolute URL of the image
    pub image_url: String,
    /// Whether this is the product's primary image
    pub is_primary: bool,
    /// Accessibility text
    pub alt_text: Option<String>,
}

impl ProductImageResponse {
    fn from_model(media_base: &str, image: product_image::Model) -> Self {
        Self {
            id: image.id,
            image_url: media_url(media_base, &image.image_path),
            is_primary: image.is_primary,
            alt_text: image.alt_text,
        }
    }
}

/// Serialized subcategory.
#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryResponse {
    /// Subcategory id
    pub id: i64,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Owning category code
    pub category: Category,
    /// Free-text description
    pub description: String,
    /// Whether the subcategory is active
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime,
    /// Last-modification timestamp
    pub updated_at: DateTime,
}

impl From<subcategory_entity::Model> for SubcategoryResponse {
    fn from(model: subcategory_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            category: model.category,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Serialized product, as returned by every catalog endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    /// Product id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Category code
    pub category: Category,
    /// Subcategory id, if any
    pub subcategory: Option<i64>,
    /// Embedded subcategory, if any
    pub subcategory_details: Option<SubcategoryResponse>,
    /// Price in dollars
    pub price: f64,
    /// Full description
    pub description: Option<String>,
    /// Listing summary
    pub short_description: Option<String>,
    /// SEO description
    pub meta_description: Option<String>,
    /// Absolute URL of the main image, if one is set
    pub image_url: Option<String>,
    /// Gallery images
    pub additional_images: Vec<ProductImageResponse>,
    /// Rating on a 0 to 5 scale
    pub rating: f64,
    /// Whether the product is in the featured rotation
    pub is_featured: bool,
    /// Creation timestamp
    pub created_at: DateTime,
    /// Last-modification timestamp
    pub updated_at: DateTime,
    /// Availability flag
    pub is_in_stock: bool,
}

impl ProductResponse {
    fn assemble(
        media_base: &str,
        product: product::Model,
        subcategory_details: Option<SubcategoryResponse>,
        images: Vec<product_image::Model>,
    ) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            subcategory: product.subcategory_id,
            subcategory_details,
            price: product.price,
            description: product.description,
            short_description: product.short_description,
            meta_description: product.meta_description,
            image_url: product
                .image_path
                .as_deref()
                .map(|path| media_url(media_base, path)),
            additional_images: images
                .into_iter()
                .map(|image| ProductImageResponse::from_model(media_base, image))
                .collect(),
            rating: product.rating,
            is_featured: product.is_featured,
            created_at: product.created_at,
            updated_at: product.updated_at,
            is_in_stock: product.is_active,
        }
    }
}

/// Serializes a batch of products, loading their subcategories and gallery
/// images in two queries total.
///
/// # Errors
/// Returns an error if a lookup query fails.
pub async fn product_responses(
    db: &DatabaseConnection,
    media_base: &str,
    products: Vec<product::Model>,
) -> Result<Vec<ProductResponse>> {
    let product_ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    let subcategory_ids: Vec<i64> = {
        let mut ids: Vec<i64> = products.iter().filter_map(|p| p.subcategory_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };

    let subcategories: HashMap<i64, subcategory_entity::Model> =
        subcategory::get_subcategories_by_ids(db, &subcategory_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

    let mut images_by_product: HashMap<i64, Vec<product_image::Model>> = HashMap::new();
    for image in catalog::get_images_for_products(db, &product_ids).await? {
        images_by_product
            .entry(image.product_id)
            .or_default()
            .push(image);
    }

    Ok(products
        .into_iter()
        .map(|product| {
            let details = product
                .subcategory_id
                .and_then(|id| subcategories.get(&id).cloned())
                .map(SubcategoryResponse::from);
            let images = images_by_product.remove(&product.id).unwrap_or_default();
            ProductResponse::assemble(media_base, product, details, images)
        })
        .collect())
}

/// Serializes a single product with its relations.
///
/// # Errors
/// Returns an error if a lookup query fails.
pub async fn product_response(
    db: &DatabaseConnection,
    media_base: &str,
    product: product::Model,
) -> Result<ProductResponse> {
    let mut responses = product_responses(db, media_base, vec![product]).await?;
    // product_responses returns exactly one element per input product.
    Ok(responses.remove(0))
}

/// Serialized order line item.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    /// Line item id
    pub id: i64,
    /// Ordered product id, null if the product was removed
    pub product: Option<i64>,
    /// Units ordered
    pub quantity: i32,
    /// Frozen unit price in cents
    pub price_cents: i64,
    /// Line total in cents
    pub subtotal_cents: i64,
}

impl From<order_item::Model> for OrderItemResponse {
    fn from(item: order_item::Model) -> Self {
        let subtotal_cents = item.subtotal_cents();
        Self {
            id: item.id,
            product: item.product_id,
            quantity: item.quantity,
            price_cents: item.price_cents,
            subtotal_cents,
        }
    }
}

/// Serialized order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    /// Order id
    pub id: i64,
    /// Unique order reference
    pub order_number: String,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Total in cents
    pub total_amount_cents: i64,
    /// Total in dollars, for display
    pub total_amount: f64,
    /// Line items
    pub items: Vec<OrderItemResponse>,
    /// Creation timestamp
    pub created_at: DateTime,
}

impl OrderResponse {
    /// Builds the order envelope from the persisted order and its items.
    #[must_use]
    pub fn from_parts(order: order::Model, items: Vec<order_item::Model>) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            status: order.status,
            total_amount_cents: order.total_amount_cents,
            total_amount: order.total_amount_cents as f64 / 100.0,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at,
        }
    }
}

/// Serialized payment record.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    /// Payment id
    pub id: i64,
    /// Order the payment belongs to
    pub order: i64,
    /// Gateway-confirmed amount in cents
    pub amount_cents: i64,
    /// Amount in dollars, for display
    pub amount: f64,
    /// Payment outcome
    pub status: PaymentStatus,
    /// Gateway payment-intent reference
    pub stripe_payment_intent_id: String,
    /// Gateway payment-method reference
    pub stripe_payment_method_id: String,
    /// Creation timestamp
    pub created_at: DateTime,
}

impl From<payment::Model> for PaymentResponse {
    fn from(payment: payment::Model) -> Self {
        Self {
            id: payment.id,
            order: payment.order_id,
            amount_cents: payment.amount_cents,
            amount: payment.amount_cents as f64 / 100.0,
            status: payment.status,
            stripe_payment_intent_id: payment.stripe_payment_intent_id,
            stripe_payment_method_id: payment.stripe_payment_method_id,
            created_at: payment.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_media_url_joins_cleanly() {
        assert_eq!(
            media_url("http://cdn.example.com/media/", "/products/a.jpg"),
            "http://cdn.example.com/media/products/a.jpg"
        );
        assert_eq!(
            media_url("http://cdn.example.com/media", "products/a.jpg"),
            "http://cdn.example.com/media/products/a.jpg"
        );
    }

    #[tokio::test]
    async fn test_product_response_embeds_relations() -> Result<()> {
        let db = setup_test_db().await?;
        let subcategory = create_test_subcategory(&db, "Audio", "audio").await?;

        let mut input = test_product_input("Speaker");
        input.subcategory_id = Some(subcategory.id);
        input.image_path = Some("products/speaker.jpg".to_string());
        let product = crate::core::catalog::create_product(&db, input).await?;
        crate::core::catalog::add_product_image(
            &db,
            product.id,
            "products/speaker-side.jpg".to_string(),
            true,
            Some("Side view".to_string()),
        )
        .await?;

        let response = product_response(&db, "http://localhost:8000/media", product).await?;
        assert_eq!(
            response.image_url.as_deref(),
            Some("http://localhost:8000/media/products/speaker.jpg")
        );
        assert_eq!(response.additional_images.len(), 1);
        assert!(response.additional_images[0].is_primary);
        assert_eq!(
            response.subcategory_details.as_ref().unwrap().slug,
            "audio"
        );
        assert!(response.is_in_stock);

        Ok(())
    }

    #[tokio::test]
    async fn test_order_response_totals() -> Result<()> {
        let db = setup_test_db().await?;
        let gateway = MockGateway::succeeding();
        let product = create_test_product(&db, "Speaker").await?;

        let created = crate::core::order::create_order(
            &db,
            &gateway,
            vec![crate::core::order::OrderItemInput {
                product_id: product.id,
                quantity: 2,
                price_cents: 999,
            }],
        )
        .await?;

        let response = OrderResponse::from_parts(created.order, created.items);
        assert_eq!(response.total_amount_cents, 1998);
        assert_eq!(response.total_amount, 19.98);
        assert_eq!(response.items[0].subtotal_cents, 1998);

        Ok(())
    }
}
