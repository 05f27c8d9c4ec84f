//! Catalog product record and its admin-facing draft payload.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, ValidationError, sanitize};

/// Maximum length of a product name.
pub const NAME_MAX: usize = 200;
/// Maximum length of a product category.
pub const CATEGORY_MAX: usize = 100;

/// A catalog product.
///
/// `stock` is the remaining sellable quantity and is the single source of
/// truth for every display path; the storefront ledger writes it back after
/// each reservation or release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    /// Image URI; opaque to the core.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub show_on_home: bool,
}

/// Payload for creating or replacing a product (admin add/edit forms and
/// the `POST`/`PUT /api/products` bodies share this shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub show_on_home: bool,
}

impl ProductDraft {
    /// Strip angle brackets and surrounding whitespace from free-text
    /// fields before validation or submission.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.name = sanitize(&self.name);
        self.category = sanitize(&self.category);
        self.description = sanitize(&self.description);
        self.ingredients = sanitize(&self.ingredients);
        self.image = sanitize(&self.image);
        self
    }

    /// Validate the draft against the catalog constraints.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: name 1..=200 characters, category
    /// 1..=100 characters, price not negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.name.len() > NAME_MAX {
            return Err(ValidationError::new(
                "name",
                format!("must be at most {NAME_MAX} characters"),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::new("category", "must not be empty"));
        }
        if self.category.len() > CATEGORY_MAX {
            return Err(ValidationError::new(
                "category",
                format!("must be at most {CATEGORY_MAX} characters"),
            ));
        }
        if self.price.is_negative() {
            return Err(ValidationError::new("price", "must not be negative"));
        }
        Ok(())
    }

    /// Materialize the draft into a product with the given id.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            description: self.description,
            ingredients: self.ingredients,
            image: self.image,
            stock: self.stock,
            show_on_home: self.show_on_home,
        }
    }
}

impl From<Product> for ProductDraft {
    fn from(p: Product) -> Self {
        Self {
            name: p.name,
            category: p.category,
            price: p.price,
            stock: p.stock,
            description: p.description,
            ingredients: p.ingredients,
            image: p.image,
            show_on_home: p.show_on_home,
        }
    }
}
