//! Core types for Mirai Patisserie.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod review;

pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Contact, OrderDraft, OrderItem, OrderStatus};
pub use price::Price;
pub use product::{Product, ProductDraft};
pub use review::{Review, ReviewDraft};

use thiserror::Error;

/// A rejected field in a draft payload.
///
/// Validation failures are surfaced inline on the submitting form and never
/// reach the notification queue or the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field, as it appears in the wire format.
    pub field: &'static str,
    /// Human-readable description of the constraint that failed.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Strip angle brackets and surrounding whitespace from user-entered text.
pub(crate) fn sanitize(s: &str) -> String {
    s.replace(['<', '>'], "").trim().to_owned()
}
