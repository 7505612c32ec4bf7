//! Unified error types and result handling for the storefront backend.
//!
//! All fallible operations in the crate return [`Result`], and the HTTP layer
//! maps each variant onto a status code in one place. Variants carry
//! structured context so callers can match on them instead of parsing
//! message strings.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem: missing environment variable, bad config.toml, etc.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what is misconfigured
        message: String,
    },

    /// Request payload failed validation (missing/malformed fields).
    #[error("Validation error: {message}")]
    Validation {
        /// Field-level description of the failure
        message: String,
    },

    /// No product with the given id exists.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No product image with the given id exists.
    #[error("Product image not found: {id}")]
    ImageNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No active subcategory with the given slug exists.
    #[error("Subcategory not found: {slug}")]
    SubcategoryNotFound {
        /// The slug that was looked up
        slug: String,
    },

    /// No order matches the given payment-intent reference.
    #[error("Order not found for reference: {reference}")]
    OrderNotFound {
        /// The gateway payment-intent id used for the lookup
        reference: String,
    },

    /// The email is already subscribed (storage-layer uniqueness violation).
    #[error("Email already subscribed: {email}")]
    DuplicateEmail {
        /// The email that collided
        email: String,
    },

    /// A subcategory with this slug already exists.
    #[error("Slug already in use: {slug}")]
    DuplicateSlug {
        /// The slug that collided
        slug: String,
    },

    /// The caller exceeded the request rate for this endpoint.
    #[error("Request was throttled")]
    RateLimited,

    /// The payment gateway rejected the request or was unreachable.
    #[error("Payment gateway error: {message}")]
    Gateway {
        /// Error detail reported by (or about) the gateway
        message: String,
    },

    /// Webhook signature verification failed.
    #[error("Webhook signature error: {message}")]
    WebhookSignature {
        /// What about the signature was unacceptable
        message: String,
    },

    /// Webhook payload could not be parsed.
    #[error("Webhook payload error: {message}")]
    WebhookPayload {
        /// What about the payload was unacceptable
        message: String,
    },

    /// Database error surfaced by SeaORM.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (socket binding, config file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
