//! Core business logic - framework-agnostic catalog, order, subcategory, and
//! newsletter operations.
//!
//! Every function here takes a `&DatabaseConnection` (plus, for the order
//! flow, a `&dyn PaymentGateway`) and returns the crate [`crate::errors::Result`],
//! keeping the HTTP layer a thin translation shell.

/// Product catalog queries and mutations, including image handling
pub mod catalog;
/// Newsletter subscription handling
pub mod newsletter;
/// Order creation, payment confirmation, and webhook-driven transitions
pub mod order;
/// Subcategory CRUD with soft deletion
pub mod subcategory;
