//! Route definitions for the `/templates` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /                    -> list_templates (?q=&contract_type_id=&active_only=)
/// POST   /                    -> save_template
/// GET    /orphans             -> list_orphans
/// GET    /{id}                -> get_template
/// DELETE /{id}                -> delete_template (?confirm=true)
/// POST   /{id}/duplicate      -> duplicate_template
/// GET    /{id}/preview        -> preview_template
/// GET    /{id}/consistency    -> check_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(templates::list_templates).post(templates::save_template),
        )
        .route("/orphans", get(templates::list_orphans))
        .route(
            "/{id}",
            get(templates::get_template).delete(templates::delete_template),
        )
        .route("/{id}/duplicate", post(templates::duplicate_template))
        .route("/{id}/preview", get(templates::preview_template))
        .route("/{id}/consistency", get(templates::check_template))
}
