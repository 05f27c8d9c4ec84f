//! Review route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use mirai_core::{Review, ReviewDraft};

use crate::db::ReviewRepository;
use crate::error::Result;
use crate::state::AppState;

/// Latest reviews, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool()).list().await?;
    Ok(Json(reviews))
}

/// Submit a review. Rate limited per client IP.
#[instrument(skip(state, draft))]
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ReviewDraft>,
) -> Result<Json<Review>> {
    let draft = draft.sanitized();
    draft.validate()?;

    let review = ReviewRepository::new(state.pool()).create(&draft).await?;
    Ok(Json(review))
}
