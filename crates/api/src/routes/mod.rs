pub mod activity;
pub mod catalog;
pub mod health;
pub mod new_data;
pub mod ui;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                              category tree (GET)
/// /items                                   items of a category (POST)
/// /common-items                            currencies and props (GET)
///
/// /activity/pool-item                      build a pool entry (POST)
/// /activity/{kind}/list                    activity ids (GET)
/// /activity/{kind}/{id}                    load (GET), save (POST)
///
/// /new-data-config                         full config (GET)
/// /new-data-config/exclude                 exclude an id (POST)
/// /new-data-config/exclude/{id}            un-exclude (DELETE)
/// /new-data-config/record                  record a new item (POST)
/// /new-data-config/recorded                all recorded items (GET)
/// /new-data-config/recorded/by-month       filtered or grouped (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/activity", activity::router())
        .nest("/new-data-config", new_data::router())
}
