//! Stripe REST client for creating and retrieving payment intents.
//!
//! Requests use Stripe's form-encoded API with bearer authentication. Only
//! the fields the order flow consumes are modeled; everything else in the
//! response is ignored.

use crate::{
    errors::{Error, Result},
    gateway::{PaymentGateway, PaymentIntent},
};
use async_trait::async_trait;
use serde::Deserialize;

/// Production Stripe API base.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

/// HTTP client for the Stripe payment-intents API.
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

/// Error envelope Stripe returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

impl StripeClient {
    /// Creates a client for the given secret key and API base.
    ///
    /// `api_base` is configurable so tests and staging can point at a
    /// stripe-mock instance instead of the live API.
    #[must_use]
    pub fn new(secret_key: String, api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            api_base,
        }
    }

    async fn decode_intent(response: reqwest::Response) -> Result<PaymentIntent> {
        if response.status().is_success() {
            return response.json::<PaymentIntent>().await.map_err(|e| Error::Gateway {
                message: format!("malformed gateway response: {e}"),
            });
        }

        let status = response.status();
        let message = match response.json::<StripeErrorEnvelope>().await {
            Ok(envelope) => envelope
                .error
                .message
                .unwrap_or_else(|| format!("gateway returned {status}")),
            Err(_) => format!("gateway returned {status}"),
        };
        Err(Error::Gateway { message })
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        order_number: &str,
    ) -> Result<PaymentIntent> {
        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            ("metadata[order_number]", order_number.to_string()),
        ];

        let response = self
            .http
            .post(format!("{}/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::Gateway {
                message: format!("payment intent creation failed: {e}"),
            })?;

        Self::decode_intent(response).await
    }

    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> Result<PaymentIntent> {
        let response = self
            .http
            .get(format!(
                "{}/payment_intents/{payment_intent_id}",
                self.api_base
            ))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| Error::Gateway {
                message: format!("payment intent retrieval failed: {e}"),
            })?;

        Self::decode_intent(response).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::gateway::IntentStatus;

    #[test]
    fn test_intent_deserializes_from_gateway_json() {
        let body = r#"{
            "id": "pi_3abc",
            "object": "payment_intent",
            "amount": 1998,
            "client_secret": "pi_3abc_secret_xyz",
            "currency": "usd",
            "status": "requires_payment_method"
        }"#;

        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert_eq!(intent.id, "pi_3abc");
        assert_eq!(intent.amount_cents, 1998);
        assert_eq!(intent.client_secret.as_deref(), Some("pi_3abc_secret_xyz"));
        assert_eq!(intent.status, IntentStatus::RequiresPaymentMethod);
    }

    #[test]
    fn test_unmodeled_status_maps_to_unknown() {
        let body = r#"{"id": "pi_x", "amount": 100, "status": "some_future_status"}"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert_eq!(intent.status, IntentStatus::Unknown);
        assert!(intent.client_secret.is_none());
    }

    #[test]
    fn test_error_envelope_parses() {
        let body = r#"{"error": {"type": "invalid_request_error", "message": "Amount must be at least 50 cents"}}"#;
        let envelope: StripeErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(
            envelope.error.message.as_deref(),
            Some("Amount must be at least 50 cents")
        );
    }
}
