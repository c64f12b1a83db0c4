//! Shared query parameter types for API handlers.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `?confirm=true` guard required by destructive endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmParams {
    /// Reject the request unless the caller confirmed it.
    pub fn require(&self, action: &str) -> AppResult<()> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "{action} requires confirmation: pass ?confirm=true"
            )))
        }
    }
}
