//! Checkout and payment handlers: order creation, synchronous payment
//! confirmation, and the gateway webhook.
//!
//! Status mapping is intentionally asymmetric to match the upstream
//! contract: gateway failures are 503 on order creation but 400 on payment
//! confirmation, and every webhook failure is a 400.

use crate::{
    api::{
        AppState,
        schemas::{OrderResponse, PaymentResponse},
    },
    core::order::{self, OrderItemInput},
    errors::Error,
    gateway::webhook::{self, SIGNATURE_HEADER},
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Checkout payload.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Requested line items
    pub items: Vec<OrderItemInput>,
}

/// Payment confirmation payload.
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    /// Gateway payment-intent reference
    pub payment_intent_id: String,
    /// Gateway payment-method reference
    pub payment_method_id: String,
}

/// `POST /api/orders/create/`
pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), Error> {
    let created = order::create_order(&state.db, state.gateway.as_ref(), body.items).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "order": OrderResponse::from_parts(created.order, created.items),
            "client_secret": created.client_secret,
        })),
    ))
}

/// `POST /api/process/`
pub async fn process_payment(
    State(state): State<AppState>,
    Json(body): Json<ProcessPaymentRequest>,
) -> Response {
    let result = order::confirm_payment(
        &state.db,
        state.gateway.as_ref(),
        &body.payment_intent_id,
        &body.payment_method_id,
    )
    .await;

    match result {
        Ok(payment) => Json(PaymentResponse::from(payment)).into_response(),
        // On this path gateway failures are the caller's problem, not an
        // outage: 400, unlike the 503 used at order creation.
        Err(Error::Gateway { message }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Payment processing failed", "details": message })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// `POST /api/webhook/`
pub async fn gateway_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let event = match webhook::verify_and_parse(
        state.config.stripe.webhook_secret.as_bytes(),
        &body,
        signature,
        chrono::Utc::now().timestamp(),
        webhook::DEFAULT_TOLERANCE_SECS,
    ) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "webhook rejected");
            return err.into_response();
        }
    };

    match order::apply_gateway_event(&state.db, &event).await {
        Ok(_) => Json(json!({ "status": "success" })).into_response(),
        // Every processing failure is reported as a 400 with detail, per the
        // upstream contract.
        Err(err) => {
            warn!(error = %err, event_type = %event.event_type, "webhook processing failed");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
