//! Order route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use mirai_core::OrderDraft;

use crate::db::OrderRepository;
use crate::db::orders::OrderRecord;
use crate::error::Result;
use crate::state::AppState;

/// Latest captured orders, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<OrderRecord>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// Capture an order with the default "received" status. Rate limited per
/// client IP.
#[instrument(skip(state, draft))]
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> Result<Json<OrderRecord>> {
    draft.validate()?;

    let order = OrderRepository::new(state.pool()).create(&draft).await?;
    tracing::info!(id = %order.id, items = draft.items.len(), "order captured");
    Ok(Json(order))
}
