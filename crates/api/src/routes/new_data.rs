//! New-data management routes mounted at `/api/new-data-config`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::new_data;
use crate::state::AppState;

/// ```text
/// GET    /                    -> get_config
/// POST   /exclude             -> exclude_item
/// DELETE /exclude/{id}        -> unexclude_item
/// POST   /record              -> record_item
/// GET    /recorded            -> list_recorded
/// GET    /recorded/by-month   -> recorded_by_month
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(new_data::get_config))
        .route("/exclude", post(new_data::exclude_item))
        .route("/exclude/{id}", delete(new_data::unexclude_item))
        .route("/record", post(new_data::record_item))
        .route("/recorded", get(new_data::list_recorded))
        .route("/recorded/by-month", get(new_data::recorded_by_month))
}
