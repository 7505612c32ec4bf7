//! API layer - HTTP-specific interface over the core operations.
//!
//! This module provides the axum surface for the storefront application:
//! route table, shared request state, response schemas, pagination helpers,
//! rate limiting, and the single place where crate errors become HTTP
//! status codes.

/// Request handlers grouped by resource
pub mod handlers;
/// Page-number pagination helpers and the list response envelope
pub mod pagination;
/// Token-bucket rate limiting for anonymous endpoints
pub mod rate_limit;
/// Route table construction
pub mod routes;
/// JSON response shapes and their assembly from entities
pub mod schemas;

use crate::{
    config::AppConfig,
    errors::Error,
    gateway::PaymentGateway,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rate_limit::{RateLimitConfig, RateLimiter};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;

/// Newsletter signups allowed per hour per anonymous caller.
const NEWSLETTER_RATE_PER_HOUR: f64 = 3.0;

/// Shared data available to all request handlers.
/// This structure holds the database connection, the payment gateway, and
/// the configuration the handlers need to build responses.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub db: DatabaseConnection,
    /// Payment gateway the order flow charges through
    pub gateway: Arc<dyn PaymentGateway>,
    /// Application configuration (media base URL, webhook secret, ...)
    pub config: Arc<AppConfig>,
    /// Rate limiter guarding the newsletter endpoint
    pub newsletter_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates the shared state with the newsletter limiter set to its
    /// 3-per-hour policy.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn PaymentGateway>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            db,
            gateway,
            config,
            newsletter_limiter: Arc::new(RateLimiter::new(RateLimitConfig {
                capacity: NEWSLETTER_RATE_PER_HOUR,
                refill_per_sec: NEWSLETTER_RATE_PER_HOUR / 3600.0,
            })),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::Validation { message } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Error::ProductNotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Product not found" }),
            ),
            Error::ImageNotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Product image not found" }),
            ),
            Error::SubcategoryNotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Subcategory not found" }),
            ),
            Error::OrderNotFound { .. } => {
                (StatusCode::NOT_FOUND, json!({ "error": "Order not found" }))
            }
            Error::DuplicateEmail { email } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "This email is already subscribed",
                    "redirect_url": format!("/register?email={email}"),
                }),
            ),
            Error::DuplicateSlug { slug } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Subcategory slug {slug:?} already exists") }),
            ),
            Error::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": "Request was throttled" }),
            ),
            Error::Gateway { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Payment service error", "details": message }),
            ),
            Error::WebhookSignature { .. } | Error::WebhookPayload { .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid payload or signature" }),
            ),
            Error::Config { .. } | Error::Database(_) | Error::Io(_) => {
                tracing::error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
