//! Route definitions for the `/placeholders` utilities.

use axum::routing::post;
use axum::Router;

use crate::handlers::placeholders;
use crate::state::AppState;

/// Routes mounted at `/placeholders`.
///
/// ```text
/// POST   /extract    -> extract
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(placeholders::extract))
}
