//! Product repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use mirai_core::{Price, Product, ProductDraft, ProductId};

use super::RepositoryError;

const COLUMNS: &str = "id, name, category, price, description, ingredients, image, stock, show_on_home";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    price: Decimal,
    description: Option<String>,
    ingredients: Option<String>,
    image: Option<String>,
    stock: Option<i32>,
    show_on_home: Option<bool>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            category: row.category,
            price: Price::new(row.price),
            description: row.description.unwrap_or_default(),
            ingredients: row.ingredients.unwrap_or_default(),
            image: row.image.unwrap_or_default(),
            stock: row.stock.and_then(|s| u32::try_from(s).ok()).unwrap_or(0),
            show_on_home: row.show_on_home.unwrap_or(false),
        }
    }
}

fn stock_param(draft: &ProductDraft) -> i32 {
    i32::try_from(draft.stock).unwrap_or(i32::MAX)
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Insert a product, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, category, price, stock, description, ingredients, image, show_on_home)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.price.amount())
        .bind(stock_param(draft))
        .bind(&draft.description)
        .bind(&draft.ingredients)
        .bind(&draft.image)
        .bind(draft.show_on_home)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a product's record, returning it, or `None` for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products
             SET name = $1, category = $2, price = $3, stock = $4, description = $5,
                 ingredients = $6, image = $7, show_on_home = $8, updated_at = NOW()
             WHERE id = $9
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.price.amount())
        .bind(stock_param(draft))
        .bind(&draft.description)
        .bind(&draft.ingredients)
        .bind(&draft.image)
        .bind(draft.show_on_home)
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Delete a product; `false` if the id was unknown.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let deleted: Option<(i64,)> =
            sqlx::query_as("DELETE FROM products WHERE id = $1 RETURNING id")
                .bind(id.as_i64())
                .fetch_optional(self.pool)
                .await?;

        Ok(deleted.is_some())
    }
}
