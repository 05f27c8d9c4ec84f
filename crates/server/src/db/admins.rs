//! Admin account repository.

use sqlx::PgPool;

use mirai_core::{AdminId, Email};

use super::RepositoryError;

/// A stored admin account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

impl AdminRecord {
    /// The typed account id.
    #[must_use]
    pub const fn admin_id(&self) -> AdminId {
        AdminId::new(self.id)
    }
}

/// Repository for admin account operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an admin by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<AdminRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRecord>(
            "SELECT id, email, password_hash FROM admins WHERE email = $1 LIMIT 1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Whether any admin account exists yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn any_exists(&self) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM admins LIMIT 1")
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Create an admin account with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// duplicate email).
    pub async fn create(&self, email: &Email, password_hash: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO admins (email, password_hash) VALUES ($1, $2)")
            .bind(email.as_str())
            .bind(password_hash)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
