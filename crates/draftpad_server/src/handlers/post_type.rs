//! Post-type HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::extract::{Path, Query, State};
use axum::Json;
use draftpad_core::models::post_type::{PostTypeResponse, TypeQuery};
use draftpad_core::AppError;

/// List all registered post types.
///
/// The capability map is included only when `context=edit` is requested.
///
/// # Errors
/// Returns an error when the registry is unavailable.
pub async fn list_types(
    State(state): State<AppState>,
    Query(query): Query<TypeQuery>,
) -> Result<Json<Vec<PostTypeResponse>>, HttpError> {
    let context = query.context.unwrap_or_default();
    let types = state.registry.list_types()?;
    Ok(Json(
        types
            .iter()
            .map(|post_type| post_type.in_context(context))
            .collect(),
    ))
}

/// Fetch a single post type by slug.
///
/// `context=edit` exposes the `supports` capability map; the default view
/// context omits it.
///
/// # Errors
/// Returns 404 when no type has the given slug.
pub async fn get_type(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<TypeQuery>,
) -> Result<Json<PostTypeResponse>, HttpError> {
    let context = query.context.unwrap_or_default();
    let post_type = state.registry.post_type(&slug)?.ok_or(AppError::NotFound)?;
    Ok(Json(post_type.in_context(context)))
}
