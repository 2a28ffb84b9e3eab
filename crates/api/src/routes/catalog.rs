//! Catalog routes, mounted directly under `/api`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, common_items};
use crate::state::AppState;

/// ```text
/// GET  /categories    -> list_categories
/// POST /items         -> list_items
/// GET  /common-items  -> list_common_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/items", post(catalog::list_items))
        .route("/common-items", get(common_items::list_common_items))
}
