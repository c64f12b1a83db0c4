//! Route definitions for the `/contract-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::contract_types;
use crate::state::AppState;

/// Routes mounted at `/contract-types`.
///
/// ```text
/// GET    /        -> list_contract_types
/// POST   /        -> save_contract_type
/// GET    /{id}    -> get_contract_type
/// DELETE /{id}    -> delete_contract_type (?confirm=true)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contract_types::list_contract_types).post(contract_types::save_contract_type),
        )
        .route(
            "/{id}",
            get(contract_types::get_contract_type).delete(contract_types::delete_contract_type),
        )
}
