use axum::routing::get;
use axum::Router;

use crate::handlers::ui;
use crate::state::AppState;

/// The single-page admin UI at `/`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(ui::index))
}
