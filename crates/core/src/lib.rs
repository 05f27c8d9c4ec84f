//! Mirai Core - Shared types library.
//!
//! This crate provides common types used across all Mirai Patisserie
//! components:
//! - `storefront` - Customer/admin application core (cart, catalog, sync)
//! - `server` - Product/review/order/auth REST API
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails, plus
//!   the product/review/order records and their validated draft payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
