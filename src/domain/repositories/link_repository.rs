//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use async_trait::async_trait;

/// Failures reported by a [`LinkRepository`].
///
/// [`StoreError::DuplicateCode`] is an expected outcome of concurrent or
/// colliding inserts; every other variant is a genuine storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The code is already taken.
    #[error("Short code already exists")]
    DuplicateCode,

    /// The code does not satisfy the lexical contract.
    #[error("Short code is malformed")]
    InvalidCode,

    /// The backend could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Durable mapping from short code to [`Link`].
///
/// The repository is the single source of truth for code uniqueness: callers
/// must never assume a code is free without attempting [`Self::insert`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Atomically inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the code already exists. Nothing
    /// is written in that case.
    ///
    /// Returns [`StoreError::InvalidCode`] if the code violates the lexical
    /// contract, regardless of earlier validation.
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Lists all links owned by `email`, newest first.
    async fn list_by_owner(&self, email: &str) -> Result<Vec<Link>, StoreError>;

    /// Records a redirect on `code` and returns its destination.
    ///
    /// Increments `total_clicks` by one and sets `last_clicked_at` to now in a
    /// single atomic step. Returns `Ok(None)` if no such code exists, in which
    /// case nothing is modified.
    async fn record_visit(&self, code: &str) -> Result<Option<String>, StoreError>;

    /// Removes a link entirely.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none existed.
    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
