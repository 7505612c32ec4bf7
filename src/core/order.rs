//! Order business logic - Handles checkout, payment confirmation, and
//! webhook-driven status transitions.
//!
//! The lifecycle is deliberately small: orders are created `PENDING` together
//! with a gateway charge intent, and move to `COMPLETED` or `FAILED` when the
//! gateway reports the outcome, either synchronously via
//! [`confirm_payment`] or asynchronously via [`apply_gateway_event`].
//! `REFUNDED` is modeled but never set here. Webhook transitions overwrite
//! status unconditionally, so redelivered events converge on the same
//! terminal state instead of erroring.

use crate::{
    entities::{
        Order, OrderStatus, PaymentStatus, Product, order, order_item, payment,
    },
    errors::{Error, Result},
    gateway::{
        IntentStatus, PaymentGateway,
        webhook::{EVENT_PAYMENT_FAILED, EVENT_PAYMENT_SUCCEEDED, GatewayEvent},
    },
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Currency every charge is denominated in.
pub const CURRENCY: &str = "usd";

/// One requested line of a new order. `price_cents` is the caller-frozen
/// snapshot, not a live product lookup.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct OrderItemInput {
    /// Product being ordered
    pub product_id: i64,
    /// Number of units, at least 1
    pub quantity: i32,
    /// Unit price snapshot in cents, at least 1
    pub price_cents: i64,
}

/// Result of a successful checkout: the persisted order, its items, and the
/// gateway secret the browser needs to complete payment.
#[derive(Debug, Clone)]
pub struct CreatedOrder {
    /// The persisted order, status `PENDING`
    pub order: order::Model,
    /// Line items persisted with the order
    pub items: Vec<order_item::Model>,
    /// Gateway client secret for completing the charge
    pub client_secret: Option<String>,
}

/// Generates a unique order reference like `ORD-1A2B3C4D`.
#[must_use]
pub fn generate_order_number() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("ORD-{}", id[..8].to_uppercase())
}

/// Total charge for a set of items, in cents.
#[must_use]
pub fn order_total_cents(items: &[OrderItemInput]) -> i64 {
    items
        .iter()
        .map(|item| item.price_cents * i64::from(item.quantity))
        .sum()
}

fn validate_items(items: &[OrderItemInput]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::Validation {
            message: "Order must contain at least one item".to_string(),
        });
    }
    for item in items {
        if item.quantity < 1 {
            return Err(Error::Validation {
                message: format!("Quantity must be at least 1 for product {}", item.product_id),
            });
        }
        if item.price_cents < 1 {
            return Err(Error::Validation {
                message: format!("Price must be at least 1 cent for product {}", item.product_id),
            });
        }
    }
    Ok(())
}

/// Creates an order: validates the items, requests a gateway charge intent
/// for the total, and persists the order (status `PENDING`) with its items in
/// one transaction.
///
/// # Errors
/// Returns an error if:
/// - The item list is empty or contains a non-positive quantity/price
/// - A referenced product does not exist
/// - The gateway rejects the charge-intent request ([`Error::Gateway`])
/// - The database write fails
pub async fn create_order(
    db: &DatabaseConnection,
    gateway: &dyn PaymentGateway,
    items: Vec<OrderItemInput>,
) -> Result<CreatedOrder> {
    validate_items(&items)?;

    for item in &items {
        Product::find_by_id(item.product_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::Validation {
                message: format!("Unknown product {}", item.product_id),
            })?;
    }

    let order_number = generate_order_number();
    let total_amount_cents = order_total_cents(&items);

    // The remote call happens before any local write: if the gateway is
    // down, no half-created order is left behind.
    let intent = gateway
        .create_payment_intent(total_amount_cents, CURRENCY, &order_number)
        .await?;

    let now = chrono::Utc::now().naive_utc();
    let txn = db.begin().await?;

    let order = order::ActiveModel {
        order_number: Set(order_number),
        status: Set(OrderStatus::Pending),
        total_amount_cents: Set(total_amount_cents),
        stripe_payment_intent_id: Set(Some(intent.id.clone())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut persisted_items = Vec::with_capacity(items.len());
    for item in items {
        let persisted = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(Some(item.product_id)),
            quantity: Set(item.quantity),
            price_cents: Set(item.price_cents),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        persisted_items.push(persisted);
    }

    txn.commit().await?;

    info!(
        order_number = %order.order_number,
        total_amount_cents,
        payment_intent = %intent.id,
        "order created"
    );

    Ok(CreatedOrder {
        order,
        items: persisted_items,
        client_secret: intent.client_secret,
    })
}

/// Finds an order by the gateway payment-intent reference stored on it.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_by_intent(
    db: &DatabaseConnection,
    payment_intent_id: &str,
) -> Result<Option<order::Model>> {
    Order::find()
        .filter(order::Column::StripePaymentIntentId.eq(payment_intent_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the line items of an order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_items_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Confirms a payment attempt: asks the gateway for the intent's current
/// state, records a [`payment::Model`] with the gateway-reported amount, and
/// moves the order to `COMPLETED` or `FAILED` accordingly. Payment row and
/// order update share one transaction.
///
/// # Errors
/// Returns an error if:
/// - The gateway call fails ([`Error::Gateway`])
/// - No order carries the payment-intent reference ([`Error::OrderNotFound`])
/// - The database write fails
pub async fn confirm_payment(
    db: &DatabaseConnection,
    gateway: &dyn PaymentGateway,
    payment_intent_id: &str,
    payment_method_id: &str,
) -> Result<payment::Model> {
    let intent = gateway.retrieve_payment_intent(payment_intent_id).await?;

    let order = get_order_by_intent(db, payment_intent_id)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            reference: payment_intent_id.to_string(),
        })?;

    let succeeded = intent.status == IntentStatus::Succeeded;
    let now = chrono::Utc::now().naive_utc();

    let txn = db.begin().await?;

    let payment = payment::ActiveModel {
        order_id: Set(order.id),
        amount_cents: Set(intent.amount_cents),
        status: Set(if succeeded {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Failed
        }),
        stripe_payment_intent_id: Set(payment_intent_id.to_string()),
        stripe_payment_method_id: Set(payment_method_id.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut order: order::ActiveModel = order.into();
    order.status = Set(if succeeded {
        OrderStatus::Completed
    } else {
        OrderStatus::Failed
    });
    order.updated_at = Set(now);
    let order = order.update(&txn).await?;

    txn.commit().await?;

    info!(
        order_number = %order.order_number,
        status = ?order.status,
        payment_intent = payment_intent_id,
        "payment confirmed"
    );

    Ok(payment)
}

/// Applies a verified gateway notification to the matching order.
///
/// Succeeded events set `COMPLETED`, failed events set `FAILED`, anything
/// else is acknowledged and ignored (`Ok(None)`). Status is overwritten
/// unconditionally, so replaying a delivery is harmless.
///
/// # Errors
/// Returns an error if:
/// - The event carries no payment-intent id ([`Error::WebhookPayload`])
/// - No order matches the intent ([`Error::OrderNotFound`])
/// - The database write fails
pub async fn apply_gateway_event(
    db: &DatabaseConnection,
    event: &GatewayEvent,
) -> Result<Option<order::Model>> {
    let target_status = match event.event_type.as_str() {
        EVENT_PAYMENT_SUCCEEDED => OrderStatus::Completed,
        EVENT_PAYMENT_FAILED => OrderStatus::Failed,
        _ => return Ok(None),
    };

    let payment_intent_id =
        event
            .payment_intent_id
            .as_deref()
            .ok_or_else(|| Error::WebhookPayload {
                message: format!("{} event without an intent id", event.event_type),
            })?;

    let order = get_order_by_intent(db, payment_intent_id)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            reference: payment_intent_id.to_string(),
        })?;

    let order_number = order.order_number.clone();
    let mut order: order::ActiveModel = order.into();
    order.status = Set(target_status);
    order.updated_at = Set(chrono::Utc::now().naive_utc());
    let order = order.update(db).await?;

    info!(
        order_number = %order_number,
        status = ?target_status,
        event_type = %event.event_type,
        "webhook applied"
    );

    Ok(Some(order))
}
