//! Link reads and deletion.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::link_input::validate_owner_email;

/// Service for reading and deleting existing links.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves a link by its short code without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Lists the links owned by `email`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `email` is not a syntactically valid
    /// address.
    pub async fn list_links(&self, email: &str) -> Result<Vec<Link>, AppError> {
        validate_owner_email(email)?;

        Ok(self.repository.list_by_owner(email).await?)
    }

    /// Deletes a link.
    ///
    /// Returns `Ok(true)` if the link existed and was removed.
    pub async fn delete_link(&self, code: &str) -> Result<bool, AppError> {
        let deleted = self.repository.delete_by_code(code).await?;

        if deleted {
            info!(%code, "Link deleted");
        }

        Ok(deleted)
    }

    /// Checks that the underlying store is reachable.
    pub async fn storage_ready(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }
}
