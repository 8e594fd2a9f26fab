//! Post HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::extract::{Path, State};
use axum::Json;
use draftpad_core::models::post::{Post, UpdatePostRequest};
use draftpad_core::AppError;

/// Fetch a post by id.
///
/// # Errors
/// Returns 404 when no post has the given id.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, HttpError> {
    let post = state.registry.post(&id)?.ok_or(AppError::NotFound)?;
    Ok(Json(post))
}

/// Apply a partial update to a post and return the merged document.
///
/// Absent fields are left untouched; `menu_order` is non-negative by type,
/// so negative values are rejected before the handler runs.
///
/// # Errors
/// Returns 404 when no post has the given id.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdatePostRequest>,
) -> Result<Json<Post>, HttpError> {
    let post = state
        .registry
        .update_post(&id, &update)?
        .ok_or(AppError::NotFound)?;
    Ok(Json(post))
}
