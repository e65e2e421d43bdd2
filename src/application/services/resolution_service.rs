//! Redirect resolution with visit recording.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// Service turning a short code into its destination.
///
/// Each successful resolution counts exactly one click. The lookup and the
/// counter update are one store operation, never a read followed by a write.
pub struct ResolutionService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> ResolutionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves `code` and records the visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code. Codes that
    /// cannot exist lexically are rejected without querying the store.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        match self.repository.record_visit(code).await? {
            Some(destination) => {
                debug!(%code, "Visit recorded");
                Ok(destination)
            }
            None => Err(not_found(code)),
        }
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
