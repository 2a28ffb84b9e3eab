//! Handlers for new-data management: exclusions and recorded items.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mwres_core::error::CoreError;
use mwres_store::models::new_data::{ExcludeItem, RecordNewItem};
use mwres_store::repositories::NewDataRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /recorded/by-month`.
#[derive(Debug, Deserialize)]
pub struct ByMonthParams {
    pub month: Option<String>,
}

/// GET /api/new-data-config
pub async fn get_config(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let config = NewDataRepo::load(&state.layout).await;
    Ok(Json(DataResponse { data: config }))
}

/// POST /api/new-data-config/exclude
pub async fn exclude_item(
    State(state): State<AppState>,
    Json(input): Json<ExcludeItem>,
) -> AppResult<impl IntoResponse> {
    let id = input
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::Validation("Missing id".into()))?;

    if NewDataRepo::exclude(&state.layout, &id).await? {
        tracing::info!(item_id = %id, "Item excluded from new data");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/new-data-config/exclude/{id}
pub async fn unexclude_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if NewDataRepo::unexclude(&state.layout, &id).await? {
        tracing::info!(item_id = %id, "Item exclusion removed");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/new-data-config/record
///
/// Promote a new item into the catalog. Returns 201 with the stored item.
pub async fn record_item(
    State(state): State<AppState>,
    Json(input): Json<RecordNewItem>,
) -> AppResult<impl IntoResponse> {
    let item = NewDataRepo::record(&state.layout, input).await?;

    tracing::info!(
        item_id = %item.id,
        item_type = %item.item_type,
        month = %item.added_date,
        "New item recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/new-data-config/recorded
pub async fn list_recorded(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = NewDataRepo::recorded(&state.layout).await;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/new-data-config/recorded/by-month?month=
///
/// With `month`: the items of that month. Without: all items grouped by
/// month, newest first.
pub async fn recorded_by_month(
    State(state): State<AppState>,
    Query(params): Query<ByMonthParams>,
) -> AppResult<impl IntoResponse> {
    match params.month.filter(|m| !m.is_empty()) {
        Some(month) => {
            let items = NewDataRepo::recorded_in_month(&state.layout, &month).await;
            Ok(Json(DataResponse { data: items }).into_response())
        }
        None => {
            let groups = NewDataRepo::recorded_by_month(&state.layout).await;
            Ok(Json(DataResponse { data: groups }).into_response())
        }
    }
}
