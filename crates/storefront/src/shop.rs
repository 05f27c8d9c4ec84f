//! The session-scoped storefront controller.
//!
//! One [`Shop`] per session owns every piece of mutable state - catalog,
//! reviews, ledger, cart, toasts, admin session - and is the single
//! serialization point for mutations: every method takes `&mut self`, so a
//! remote completion is applied before the next action can begin and a stale
//! response can never overwrite a newer edit.
//!
//! Mutations are local-first. Product and review writes try the remote API
//! when it is configured (and, for products, an admin is logged in), apply
//! the server's canonical record on success, and fall back to a locally
//! generated record on failure without surfacing an error - the only
//! user-visible sync failure is the startup advisory notice.

use mirai_core::{
    Contact, OrderDraft, OrderItem, Product, ProductDraft, ProductId, Review, ReviewDraft,
    ReviewId, ValidationError,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::api::CatalogClient;
use crate::cart::{Cart, CartError, CartLineId, QuantityOutcome};
use crate::checkout;
use crate::config::StorefrontConfig;
use crate::ledger::StockLedger;
use crate::notify::ToastTray;
use crate::seed;
use crate::session::AdminSession;
use crate::store::{BlobStore, JsonFileStore, MemoryStore, StoreError, keys};

/// Maximum reviews kept on the customer-visible wall.
const REVIEW_WALL_CAP: usize = 20;

/// How startup reconciliation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Server state replaced local state.
    Remote,
    /// No API configured, or it was unreachable; running on local state.
    LocalOnly,
}

/// Checkout could not be completed; cart and stock are unchanged.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("could not build handoff link: {0}")]
    Link(#[from] url::ParseError),
}

/// The storefront session controller.
pub struct Shop {
    api: Option<CatalogClient>,
    store: Box<dyn BlobStore>,
    order_phone: String,
    products: Vec<Product>,
    reviews: Vec<Review>,
    ledger: StockLedger,
    cart: Cart,
    toasts: ToastTray,
    session: AdminSession,
    next_local_id: i64,
}

impl Shop {
    /// Create a controller with explicit collaborators.
    ///
    /// State is empty until [`start`](Self::start) loads it.
    #[must_use]
    pub fn new(
        api: Option<CatalogClient>,
        store: Box<dyn BlobStore>,
        order_phone: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            order_phone: order_phone.into(),
            products: Vec::new(),
            reviews: Vec::new(),
            ledger: StockLedger::new(),
            cart: Cart::new(),
            toasts: ToastTray::new(),
            session: AdminSession::default(),
            next_local_id: 1,
        }
    }

    /// Create a controller from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the configured blob store cannot be opened.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StoreError> {
        let store: Box<dyn BlobStore> = match &config.data_path {
            Some(path) => Box::new(JsonFileStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::new(
            config.api_base.clone().map(CatalogClient::new),
            store,
            config.order_phone.clone(),
        ))
    }

    // =========================================================================
    // Startup reconciliation
    // =========================================================================

    /// Load persisted state, then reconcile with the remote API if one is
    /// configured.
    ///
    /// On a successful sync the server's product and review collections
    /// replace local state entirely, discarding local-only records. On
    /// failure local state stands and a single advisory toast is pushed.
    pub async fn start(&mut self) -> SyncStatus {
        self.load_persisted();

        let Some(api) = self.api.clone() else {
            return SyncStatus::LocalOnly;
        };

        match tokio::try_join!(api.fetch_products(), api.fetch_reviews()) {
            Ok((products, reviews)) => {
                self.products = products;
                self.reviews = reviews;
                self.ledger = StockLedger::from_catalog(&self.products);
                self.reseed_local_ids();
                self.persist_products();
                self.persist_reviews();
                tracing::info!(
                    products = self.products.len(),
                    reviews = self.reviews.len(),
                    "catalog synced from server"
                );
                SyncStatus::Remote
            }
            Err(err) => {
                tracing::warn!(%err, "catalog sync failed; continuing with local data");
                self.toasts
                    .push("Failed to sync with server. Showing local data.");
                SyncStatus::LocalOnly
            }
        }
    }

    fn load_persisted(&mut self) {
        self.products = self
            .load_blob(keys::PRODUCTS)
            .unwrap_or_else(seed::products);
        self.reviews = self.load_blob(keys::REVIEWS).unwrap_or_else(seed::reviews);
        let token = match self.store.load(keys::ADMIN_TOKEN) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(%err, "could not load persisted admin token");
                None
            }
        };
        self.session = AdminSession::from_token(token);
        self.ledger = StockLedger::from_catalog(&self.products);
        self.reseed_local_ids();
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// Rejections surface as a toast ("out of stock") and leave cart and
    /// ledger unchanged; successes toast "added to bag".
    ///
    /// # Errors
    ///
    /// Returns the underlying [`CartError`] for callers that want it; the
    /// user-facing signal is the toast either way.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<CartLineId, CartError> {
        let Some(product) = self.products.iter().find(|p| p.id == product_id).cloned() else {
            // The UI clicked a product the catalog no longer has.
            let err = CartError::OutOfStock {
                name: "This item".to_owned(),
            };
            self.toasts.push(err.to_string());
            return Err(err);
        };

        match self.cart.add(&product, &mut self.ledger) {
            Ok(line_id) => {
                self.sync_stock(product_id);
                self.persist_products();
                self.toasts.push(format!("{} added to bag", product.name));
                Ok(line_id)
            }
            Err(err) => {
                self.toasts.push(err.to_string());
                Err(err)
            }
        }
    }

    /// Remove a cart line, releasing its stock. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, line_id: CartLineId) {
        if let Some(removed) = self.cart.remove(line_id, &mut self.ledger) {
            self.sync_stock(removed.product_id);
            self.persist_products();
        }
    }

    /// Set a cart line's quantity (below 1 removes it).
    ///
    /// An increase beyond availability is rejected all-or-nothing with a
    /// "Not enough stock" toast.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`CartError`] on rejection.
    pub fn set_cart_quantity(
        &mut self,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<QuantityOutcome, CartError> {
        let product_id = self.cart.find(line_id).map(|l| l.product_id);
        match self.cart.set_quantity(line_id, quantity, &mut self.ledger) {
            Ok(outcome) => {
                if let Some(product_id) = product_id {
                    self.sync_stock(product_id);
                    self.persist_products();
                }
                Ok(outcome)
            }
            Err(err) => {
                self.toasts.push("Not enough stock");
                Err(err)
            }
        }
    }

    /// Finalize the order: validate, capture it best-effort on the API, and
    /// build the messaging deep link. Empties the cart WITHOUT releasing
    /// stock - the sale permanently consumes the reserved units.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] for an empty cart or invalid contact; the
    /// cart is left as it was.
    pub async fn checkout(&mut self, contact: Contact) -> Result<Url, CheckoutError> {
        let items: Vec<OrderItem> = self
            .cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();
        let draft = OrderDraft { items, contact };
        draft.validate()?;

        if let Some(api) = &self.api
            && let Err(err) = api.create_order(&draft).await
        {
            // The deep link is the real submission channel; the API record
            // is advisory.
            tracing::warn!(%err, "order capture failed; continuing with handoff");
        }

        let summary = checkout::order_summary(&draft.items, &draft.contact);
        let link = checkout::handoff_link(&self.order_phone, &summary)?;
        self.cart.clear();
        Ok(link)
    }

    // =========================================================================
    // Catalog mutations (admin)
    // =========================================================================

    /// Add a product to the catalog.
    ///
    /// Remote-first when the API is configured and an admin is logged in;
    /// otherwise (or on remote failure) the product is applied locally with
    /// a generated id. Either way the user sees "Product added".
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a malformed draft; surfaced inline on
    /// the form, no toast, nothing submitted.
    pub async fn add_product(&mut self, draft: ProductDraft) -> Result<ProductId, ValidationError> {
        let draft = draft.sanitized();
        draft.validate()?;

        let canonical = match (&self.api, self.session.token()) {
            (Some(api), Some(token)) => match api.create_product(&draft, token).await {
                Ok(product) => Some(product),
                Err(err) => {
                    tracing::warn!(%err, "remote product create failed; applying locally");
                    None
                }
            },
            _ => None,
        };

        let product = match canonical {
            Some(product) => product,
            None => {
                let id = ProductId::new(self.alloc_local_id());
                draft.into_product(id)
            }
        };
        let id = product.id;
        self.ledger.set_entry(id, product.stock);
        self.products.push(product);
        self.persist_products();
        self.toasts.push("Product added");
        Ok(id)
    }

    /// Replace a product's record.
    ///
    /// Same remote-then-local state machine as [`add_product`](Self::add_product).
    /// Re-baselines the product's stock in the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a malformed draft.
    pub async fn update_product(
        &mut self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<(), ValidationError> {
        let draft = draft.sanitized();
        draft.validate()?;

        let canonical = match (&self.api, self.session.token()) {
            (Some(api), Some(token)) => match api.update_product(id, &draft, token).await {
                Ok(product) => Some(product),
                Err(err) => {
                    tracing::warn!(%err, %id, "remote product update failed; applying locally");
                    None
                }
            },
            _ => None,
        };

        let updated = canonical.unwrap_or_else(|| draft.into_product(id));
        if let Some(slot) = self.products.iter_mut().find(|p| p.id == id) {
            let stock = updated.stock;
            *slot = updated;
            self.ledger.set_entry(id, stock);
            self.persist_products();
        } else {
            tracing::warn!(%id, "update for unknown product ignored");
        }
        self.toasts.push("Product updated");
        Ok(())
    }

    /// Delete a product from the catalog (remote best-effort, local always).
    pub async fn delete_product(&mut self, id: ProductId) {
        if let (Some(api), Some(token)) = (&self.api, self.session.token())
            && let Err(err) = api.delete_product(id, token).await
        {
            tracing::warn!(%err, %id, "remote product delete failed; removing locally");
        }

        self.products.retain(|p| p.id != id);
        self.ledger.remove(id);
        self.persist_products();
        self.toasts.push("Product removed");
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Submit a review.
    ///
    /// Always attempts the remote API when configured (no auth needed); on
    /// failure the review is kept locally with a generated id. The visible
    /// wall is newest-first and capped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a malformed draft; nothing submitted.
    pub async fn add_review(&mut self, draft: ReviewDraft) -> Result<(), ValidationError> {
        let mut draft = draft.sanitized();
        draft.city = Some(
            draft
                .city
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or("Guest")
                .to_owned(),
        );
        draft.validate()?;

        let canonical = if let Some(api) = &self.api {
            match api.create_review(&draft).await {
                Ok(review) => Some(review),
                Err(err) => {
                    tracing::warn!(%err, "remote review create failed; applying locally");
                    None
                }
            }
        } else {
            None
        };

        let review = match canonical {
            Some(review) => review,
            None => Review {
                id: ReviewId::new(self.alloc_local_id()),
                name: draft.name,
                city: draft.city.unwrap_or_default(),
                rating: draft.rating,
                text: draft.text,
                created_at: chrono::Utc::now(),
            },
        };

        self.reviews.insert(0, review);
        self.reviews.truncate(REVIEW_WALL_CAP);
        self.persist_reviews();
        self.toasts.push("Thanks for your review!");
        Ok(())
    }

    // =========================================================================
    // Admin session
    // =========================================================================

    /// Exchange credentials for an admin session.
    ///
    /// Bad credentials (or no API to ask) toast "Invalid credentials" and
    /// create no session.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let Some(api) = &self.api else {
            self.toasts.push("Invalid credentials");
            return false;
        };

        match api.login(email, password).await {
            Ok(response) => {
                self.session.set_token(response.token.clone());
                if let Err(err) = self.store.save(keys::ADMIN_TOKEN, &response.token) {
                    tracing::warn!(%err, "could not persist admin token");
                }
                self.toasts.push("Admin logged in");
                true
            }
            Err(err) => {
                tracing::debug!(%err, "login rejected");
                self.toasts.push("Invalid credentials");
                false
            }
        }
    }

    /// End the admin session and forget the persisted token.
    pub fn logout(&mut self) {
        self.session.clear();
        if let Err(err) = self.store.remove(keys::ADMIN_TOKEN) {
            tracing::warn!(%err, "could not remove persisted admin token");
        }
        self.toasts.push("Logged out");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current catalog.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The review wall, newest first.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// The cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Remaining sellable units for a product.
    #[must_use]
    pub fn stock_available(&self, product_id: ProductId) -> u32 {
        self.ledger.available(product_id)
    }

    /// Handle to the notification tray.
    #[must_use]
    pub fn toasts(&self) -> ToastTray {
        self.toasts.clone()
    }

    /// The admin session.
    #[must_use]
    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Copy ledger availability back onto the displayed product record.
    fn sync_stock(&mut self, product_id: ProductId) {
        let available = self.ledger.available(product_id);
        if let Some(product) = self.products.iter_mut().find(|p| p.id == product_id) {
            product.stock = available;
        }
    }

    fn alloc_local_id(&mut self) -> i64 {
        let id = self.next_local_id;
        self.next_local_id += 1;
        id
    }

    fn reseed_local_ids(&mut self) {
        let max_product = self.products.iter().map(|p| p.id.as_i64()).max();
        let max_review = self.reviews.iter().map(|r| r.id.as_i64()).max();
        self.next_local_id = max_product.max(max_review).unwrap_or(0).max(0) + 1;
    }

    fn load_blob<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        match self.store.load(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(key, %err, "discarding unreadable persisted blob");
                    if let Err(err) = self.store.remove(key) {
                        tracing::warn!(key, %err, "could not remove unreadable blob");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key, %err, "could not load persisted blob");
                None
            }
        }
    }

    fn persist_blob<T: Serialize>(&mut self, key: &str, value: &T) {
        // Persistence is best-effort; the interface never blocks on it.
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(err) = self.store.save(key, &raw) {
                    tracing::warn!(key, %err, "could not persist blob");
                }
            }
            Err(err) => tracing::warn!(key, %err, "could not serialize blob"),
        }
    }

    fn persist_products(&mut self) {
        let products = std::mem::take(&mut self.products);
        self.persist_blob(keys::PRODUCTS, &products);
        self.products = products;
    }

    fn persist_reviews(&mut self) {
        let reviews = std::mem::take(&mut self.reviews);
        self.persist_blob(keys::REVIEWS, &reviews);
        self.reviews = reviews;
    }
}
