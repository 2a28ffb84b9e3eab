use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mwres_store::repositories::ItemTypeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/common-items
///
/// Currencies and props from the item type mapping, with icons resolved by
/// item type.
pub async fn list_common_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = ItemTypeRepo::common_items(&state.layout, &state.resolver).await;
    Ok(Json(DataResponse { data: items }))
}
