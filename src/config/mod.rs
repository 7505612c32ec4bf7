//! Configuration management for database, gateway, and server settings.
//!
//! Settings come from the environment (with `.env` loaded by the binary) and
//! an optional `config.toml` that seeds the initial subcategory tree.

/// Database connection and table creation
pub mod database;
/// Subcategory seed data loading from config.toml
pub mod seed;

use crate::errors::{Error, Result};
use crate::gateway::stripe::DEFAULT_API_BASE;
use std::env;

/// Payment gateway credentials and endpoint.
#[derive(Debug, Clone)]
pub struct StripeSettings {
    /// Secret API key used for bearer authentication
    pub secret_key: String,
    /// Shared secret for webhook signature verification
    pub webhook_secret: String,
    /// API base URL, overridable for staging or a local mock
    pub api_base: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Database connection string
    pub database_url: String,
    /// Base URL product image paths are resolved against
    pub media_base_url: String,
    /// Gateway settings
    pub stripe: StripeSettings,
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config {
        message: format!("{name} must be set"),
    })
}

/// Loads the application configuration from the environment.
///
/// `DATABASE_URL`, `BIND_ADDR`, `MEDIA_BASE_URL`, and `STRIPE_API_BASE` have
/// development defaults; the two Stripe secrets are mandatory.
///
/// # Errors
/// Returns [`Error::Config`] when a mandatory variable is missing.
pub fn load_app_configuration() -> Result<AppConfig> {
    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/storefront.sqlite?mode=rwc".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let media_base_url =
        env::var("MEDIA_BASE_URL").unwrap_or_else(|_| "http://localhost:8000/media".to_string());

    let stripe = StripeSettings {
        secret_key: required("STRIPE_SECRET_KEY")?,
        webhook_secret: required("STRIPE_WEBHOOK_SECRET")?,
        api_base: env::var("STRIPE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
    };

    Ok(AppConfig {
        bind_addr,
        database_url,
        media_base_url,
        stripe,
    })
}
