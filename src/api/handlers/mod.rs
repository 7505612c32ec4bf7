//! Request handlers, grouped the way the route table groups endpoints.

/// Newsletter signup endpoint
pub mod newsletter;
/// Order creation, payment confirmation, and the gateway webhook
pub mod payments;
/// Catalog browsing endpoints
pub mod products;
/// Subcategory CRUD endpoints
pub mod subcategories;
