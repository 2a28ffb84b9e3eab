//! Activity editor routes mounted at `/api/activity`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// ```text
/// POST /pool-item       -> build_pool_item
/// GET  /{kind}/list     -> list_activities
/// GET  /{kind}/{id}     -> get_activity
/// POST /{kind}/{id}     -> save_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pool-item", post(activity::build_pool_item))
        .route("/{kind}/list", get(activity::list_activities))
        .route(
            "/{kind}/{id}",
            get(activity::get_activity).post(activity::save_activity),
        )
}
