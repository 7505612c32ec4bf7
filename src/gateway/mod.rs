//! Payment gateway boundary - the trait the order flow talks to and the wire
//! types shared between the real Stripe client and test doubles.
//!
//! `core::order` only ever sees `&dyn PaymentGateway`, so the charge flow can
//! be exercised in tests with a scripted mock while production wires in
//! [`stripe::StripeClient`].

/// Stripe REST client implementing [`PaymentGateway`]
pub mod stripe;
/// Webhook signature verification and event parsing
pub mod webhook;

use crate::errors::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Current state of a gateway charge intent, as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    /// The charge went through
    Succeeded,
    /// The gateway is still processing the charge
    Processing,
    /// Awaiting a payment method from the customer
    RequiresPaymentMethod,
    /// Awaiting confirmation from the caller
    RequiresConfirmation,
    /// Awaiting a customer action (e.g. 3-D Secure)
    RequiresAction,
    /// Authorized, awaiting capture
    RequiresCapture,
    /// The intent was canceled
    Canceled,
    /// Any status this client does not model
    #[serde(other)]
    Unknown,
}

/// A gateway charge intent: the remote representation of an in-progress
/// charge, referenced everywhere by its opaque `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Opaque gateway identifier (e.g., "pi_...")
    pub id: String,
    /// Secret the browser needs to complete payment; only present on creation
    pub client_secret: Option<String>,
    /// Charge amount in cents
    #[serde(rename = "amount")]
    pub amount_cents: i64,
    /// Current intent status
    pub status: IntentStatus,
}

/// The operations the order flow needs from a payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a charge intent for `amount_cents`, tagged with the order
    /// number so gateway-side records can be traced back to ours.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Gateway`] if the gateway is
    /// unreachable or rejects the request.
    async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        order_number: &str,
    ) -> Result<PaymentIntent>;

    /// Fetches the current state of an existing charge intent.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Gateway`] if the gateway is
    /// unreachable or does not know the intent.
    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> Result<PaymentIntent>;
}
