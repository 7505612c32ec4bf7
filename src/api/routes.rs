//! Route table for the storefront API.

use crate::api::{
    AppState,
    handlers::{newsletter, payments, products, subcategories},
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Builds the application router with permissive CORS for browser callers.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/products/featured/", get(products::featured_products))
        .route("/api/products/", get(products::list_products))
        .route("/api/products/:id/", get(products::product_detail))
        .route(
            "/api/products/category/:category/",
            get(products::products_by_category),
        )
        .route(
            "/api/subcategories/",
            get(subcategories::list_subcategories).post(subcategories::create_subcategory),
        )
        .route(
            "/api/subcategories/detail/:slug/",
            get(subcategories::subcategory_detail)
                .patch(subcategories::patch_subcategory)
                .delete(subcategories::delete_subcategory),
        )
        .route("/api/newsletter/subscribe/", post(newsletter::subscribe))
        .route("/api/orders/create/", post(payments::create_order))
        .route("/api/process/", post(payments::process_payment))
        .route("/api/webhook/", post(payments::gateway_webhook))
        .layer(cors)
        .with_state(state)
}
