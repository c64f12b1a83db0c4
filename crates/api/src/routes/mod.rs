pub mod contract_types;
pub mod health;
pub mod placeholders;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contract-types                      list, save
/// /contract-types/{id}                 get, delete (?confirm=true)
///
/// /templates                           filtered previews, save
/// /templates/orphans                   templates whose contract type is gone
/// /templates/{id}                      get, delete (?confirm=true)
/// /templates/{id}/duplicate            duplicate (POST)
/// /templates/{id}/preview              rendered HTML document
/// /templates/{id}/consistency          consistency findings
///
/// /placeholders/extract                extract token names from markup (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/contract-types", contract_types::router())
        .nest("/templates", templates::router())
        .nest("/placeholders", placeholders::router())
}
