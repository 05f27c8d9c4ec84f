//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use mirai_core::{Product, ProductDraft, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List the catalog, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Create a product (admin only).
#[instrument(skip(state, admin, draft), fields(admin = %admin.0.email))]
pub async fn create(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>> {
    let draft = draft.sanitized();
    draft.validate()?;

    let product = ProductRepository::new(state.pool()).create(&draft).await?;
    tracing::info!(id = %product.id, "product created");
    Ok(Json(product))
}

/// Replace a product (admin only).
#[instrument(skip(state, admin, draft), fields(admin = %admin.0.email))]
pub async fn update(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<i64>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>> {
    let draft = draft.sanitized();
    draft.validate()?;

    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool())
        .update(id, &draft)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// Delete a product (admin only).
#[instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn destroy(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let id = ProductId::new(id);
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}
