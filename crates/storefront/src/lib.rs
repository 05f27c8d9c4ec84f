//! Mirai Storefront - the session-scoped application core.
//!
//! This crate drives the customer and admin experience of the pastry shop:
//! one [`Shop`] controller per session owns the catalog, the cart, the stock
//! ledger, the notification tray, and the admin session, and reconciles them
//! with the remote catalog API when one is configured.
//!
//! # Architecture
//!
//! - [`ledger`] - per-product stock accounting (reserve/release)
//! - [`cart`] - cart lines, coupled transactionally to the ledger
//! - [`notify`] - ephemeral toast notifications with timed expiry
//! - [`api`] - reqwest client for the product/review/order/auth API
//! - [`store`] - persistent key-value blob store (localStorage stand-in)
//! - [`shop`] - the controller tying it all together, local-first with
//!   best-effort remote propagation
//! - [`checkout`] - order summary and messaging deep-link handoff
//!
//! Presentational concerns (pages, modals, styling) live outside this crate;
//! everything here is UI-agnostic state and behavior.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod ledger;
pub mod notify;
pub mod seed;
pub mod session;
pub mod shop;
pub mod store;

pub use api::{ApiError, CatalogClient};
pub use cart::{Cart, CartError, CartLine, CartLineId, QuantityOutcome};
pub use config::StorefrontConfig;
pub use ledger::{InsufficientStock, StockLedger};
pub use notify::{Toast, ToastTray};
pub use session::AdminSession;
pub use shop::{CheckoutError, Shop, SyncStatus};
pub use store::{BlobStore, JsonFileStore, MemoryStore, StoreError};
