//! Handlers for the activity (gacha pool) editor.
//!
//! Documents are passed through as JSON values. Image paths are added to
//! every pool item on load and removed before save.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mwres_core::activity::{inject_image_paths, ActivityKind};
use mwres_core::pool::{self, DraggedItem};
use mwres_store::repositories::ActivityRepo;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/activity/pool-item`.
#[derive(Debug, Deserialize)]
pub struct PoolItemRequest {
    /// The dragged catalog row or pool entry.
    pub item: DraggedItem,
    /// Category the item was dragged from (`"main"` or `"main - sub"`).
    #[serde(default)]
    pub category: Option<String>,
    /// Current contents of the target pool. Entries are only checked for
    /// their `id`; saved pools may hold partial or loosely typed items.
    #[serde(default)]
    pub pool: Vec<Value>,
}

/// GET /api/activity/{kind}/list
pub async fn list_activities(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind: ActivityKind = kind.parse()?;
    let ids = ActivityRepo::list(&state.layout, kind).await?;
    Ok(Json(DataResponse { data: ids }))
}

/// GET /api/activity/{kind}/{id}
///
/// Returns the document with `image_path` set on every pool item whose
/// image could be resolved.
pub async fn get_activity(
    State(state): State<AppState>,
    Path((kind, activity_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind: ActivityKind = kind.parse()?;
    let mut document = ActivityRepo::load(&state.layout, kind, &activity_id).await?;

    let resolved = inject_image_paths(kind, &mut document, &activity_id, &state.resolver);
    tracing::debug!(kind = %kind, activity_id = %activity_id, resolved, "Activity loaded");

    Ok(Json(DataResponse { data: document }))
}

/// POST /api/activity/{kind}/{id}
///
/// Save a document verbatim except for pool item image paths.
pub async fn save_activity(
    State(state): State<AppState>,
    Path((kind, activity_id)): Path<(String, String)>,
    Json(document): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let kind: ActivityKind = kind.parse()?;
    ActivityRepo::save(&state.layout, kind, &activity_id, document).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/activity/pool-item
///
/// Turn a dragged item into a pool entry, inferring its type from the
/// source category. Rejects ids already present in the target pool.
pub async fn build_pool_item(
    State(state): State<AppState>,
    Json(input): Json<PoolItemRequest>,
) -> AppResult<impl IntoResponse> {
    let existing_ids: Vec<&str> = input
        .pool
        .iter()
        .filter_map(|entry| entry.get("id")?.as_str())
        .collect();

    let item = pool::build_pool_item(
        &state.type_rules,
        &input.item,
        input.category.as_deref(),
        &existing_ids,
    )?;
    Ok(Json(DataResponse { data: item }))
}
