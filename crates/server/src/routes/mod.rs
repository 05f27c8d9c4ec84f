//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Products
//! GET    /api/products         - Full catalog, newest first
//! POST   /api/products         - Create product (bearer token)
//! PUT    /api/products/{id}    - Replace product (bearer token)
//! DELETE /api/products/{id}    - Delete product (bearer token)
//!
//! # Reviews
//! GET  /api/reviews            - Latest reviews
//! POST /api/reviews            - Submit review (rate limited)
//!
//! # Orders
//! GET  /api/orders             - Latest orders
//! POST /api/orders             - Capture order (rate limited)
//!
//! # Auth
//! POST /api/auth/login         - Exchange credentials for a bearer token
//! POST /api/auth/bootstrap     - Create the first admin account
//! ```

pub mod auth;
pub mod orders;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::middleware::{order_rate_limiter, review_rate_limiter};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/", post(products::create))
        .route("/{id}", put(products::update))
        .route("/{id}", delete(products::destroy))
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::index))
        .route("/", post(reviews::create).layer(review_rate_limiter()))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/", post(orders::create).layer(order_rate_limiter()))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/bootstrap", post(auth::bootstrap))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/products", product_routes())
        .nest("/api/reviews", review_routes())
        .nest("/api/orders", order_routes())
}
