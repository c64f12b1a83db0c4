//! Acting identity extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::state::AppState;

/// Header carrying the acting user's email.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The user performing a request, recorded as `createdBy` on new templates.
///
/// Read from the `x-user-email` header; a missing, blank or non-UTF-8 value
/// falls back to the configured default actor.
///
/// ```ignore
/// async fn my_handler(actor: ActingUser) -> AppResult<Json<()>> {
///     tracing::info!(actor = %actor.0, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ActingUser(pub String);

impl ActingUser {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        Ok(ActingUser(
            email.map_or_else(|| state.config.default_actor.clone(), str::to_string),
        ))
    }
}
