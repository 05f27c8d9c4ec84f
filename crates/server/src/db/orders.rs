//! Order repository.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use mirai_core::{OrderDraft, OrderId, OrderStatus};

use super::RepositoryError;

/// Orders returned by the list endpoint.
const LIST_LIMIT: i64 = 100;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    payload: serde_json::Value,
    contact: Option<serde_json::Value>,
    status: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

/// A captured order as the API reports it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    pub items: serde_json::Value,
    pub contact: serde_json::Value,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            items: row.payload,
            contact: row.contact.unwrap_or(serde_json::Value::Null),
            status: row
                .status
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            created_at: row.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Latest orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, payload, contact, status, created_at
             FROM orders ORDER BY created_at DESC LIMIT $1",
        )
        .bind(LIST_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }

    /// Insert an order with the default "received" status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if serialization or the insert fails.
    pub async fn create(&self, draft: &OrderDraft) -> Result<OrderRecord, RepositoryError> {
        let payload = serde_json::to_value(&draft.items)?;
        let contact = serde_json::to_value(&draft.contact)?;

        let row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO orders (payload, contact) VALUES ($1, $2)
             RETURNING id, payload, contact, status, created_at",
        )
        .bind(payload)
        .bind(contact)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
