//! Request middleware: bearer-token auth and rate limiting.

pub mod auth;
pub mod rate_limit;

pub use auth::{Claims, RequireAdmin, issue_token};
pub use rate_limit::{order_rate_limiter, review_rate_limiter};
