//! Handlers for the category tree and category item lists.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mwres_core::catalog::ItemSource;
use mwres_store::repositories::CatalogRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/items`.
#[derive(Debug, Deserialize)]
pub struct ItemsRequest {
    /// A category `path`: a CSV path relative to the data directory or a
    /// synthetic `__new_data__` / `__recorded_data__` path.
    #[serde(default)]
    pub csv_path: String,
    /// Label of the clicked category, used to pick the image folder.
    #[serde(default)]
    pub category: String,
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tree = CatalogRepo::scan_categories(&state.layout, &state.resolver).await?;
    Ok(Json(DataResponse { data: tree }))
}

/// POST /api/items
///
/// Items of one category. Paths escaping the data directory are rejected.
pub async fn list_items(
    State(state): State<AppState>,
    Json(input): Json<ItemsRequest>,
) -> AppResult<impl IntoResponse> {
    let source = ItemSource::parse(&input.csv_path)?;
    let items =
        CatalogRepo::load_items(&state.layout, &state.resolver, &source, &input.category).await?;

    tracing::debug!(
        csv_path = %input.csv_path,
        category = %input.category,
        count = items.len(),
        "Loaded category items",
    );

    Ok(Json(DataResponse { data: items }))
}
