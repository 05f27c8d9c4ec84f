//! Database access: pool creation, startup schema, repositories.
//!
//! Queries use the runtime `query_as` API with `FromRow` types, so the crate
//! builds without a live database. The schema is created on startup with
//! idempotent DDL; there is no separate migration step for a catalog this
//! size.

pub mod admins;
pub mod orders;
pub mod products;
pub mod reviews;

pub use admins::AdminRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A value could not be converted to its storage form.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Create a connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database is unreachable.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url.expose_secret())
        .await
}

/// Idempotent startup DDL for all tables.
const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        price NUMERIC NOT NULL,
        description TEXT,
        ingredients TEXT,
        image TEXT,
        stock INTEGER DEFAULT 0,
        show_on_home BOOLEAN DEFAULT false,
        created_at TIMESTAMPTZ DEFAULT NOW(),
        updated_at TIMESTAMPTZ DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS reviews (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT,
        rating INTEGER CHECK (rating >= 1 AND rating <= 5),
        text TEXT NOT NULL,
        created_at TIMESTAMPTZ DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        payload JSONB NOT NULL,
        contact JSONB,
        status TEXT DEFAULT 'received',
        created_at TIMESTAMPTZ DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS admins (
        id BIGSERIAL PRIMARY KEY,
        email TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ DEFAULT NOW()
    );
";

/// Create all tables if they do not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the DDL fails.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
