//! Link allocation: validation, code generation and collision handling.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, MAX_CODE_LENGTH, MIN_CODE_LENGTH, is_valid_code};
use crate::utils::link_input::{validate_destination_url, validate_owner_email};

/// Insert attempts for a generated code before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service creating new links.
///
/// Caller-chosen codes are inserted once: if the code is taken the caller gets
/// a conflict, since substituting another code would not be what they asked
/// for. Generated codes are retried on collision up to `max_attempts` times.
pub struct AllocationService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: CodeGenerator,
    max_attempts: usize,
}

impl<R: LinkRepository + ?Sized> AllocationService<R> {
    /// Creates a new allocation service.
    ///
    /// `max_attempts` is clamped to at least one.
    pub fn new(repository: Arc<R>, generator: CodeGenerator, max_attempts: usize) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a link, generating a code if none is requested.
    ///
    /// All input is validated before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL, email or requested code is
    /// malformed.
    ///
    /// Returns [`AppError::Conflict`] if the requested code is already taken.
    ///
    /// Returns [`AppError::AllocationExhausted`] if every generated candidate
    /// collided.
    pub async fn allocate(
        &self,
        requested_code: Option<String>,
        destination_url: String,
        owner_email: String,
    ) -> Result<Link, AppError> {
        validate_destination_url(&destination_url)?;
        validate_owner_email(&owner_email)?;

        match requested_code {
            Some(code) => {
                self.allocate_requested(code, destination_url, owner_email)
                    .await
            }
            None => self.allocate_generated(destination_url, owner_email).await,
        }
    }

    async fn allocate_requested(
        &self,
        code: String,
        destination_url: String,
        owner_email: String,
    ) -> Result<Link, AppError> {
        if !is_valid_code(&code) {
            return Err(AppError::bad_request(
                format!(
                    "Code must be {MIN_CODE_LENGTH}-{MAX_CODE_LENGTH} ASCII letters or digits"
                ),
                json!({ "field": "code", "code": code }),
            ));
        }

        let new_link = NewLink::new(code.clone(), destination_url, owner_email);

        match self.repository.insert(new_link).await {
            Ok(link) => {
                info!(code = %link.code, "Link created with requested code");
                Ok(link)
            }
            Err(StoreError::DuplicateCode) => {
                debug!(%code, "Requested code already taken");
                Err(AppError::conflict(
                    "Code already exists",
                    json!({ "code": code }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn allocate_generated(
        &self,
        destination_url: String,
        owner_email: String,
    ) -> Result<Link, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();
            let new_link = NewLink::new(code, destination_url.clone(), owner_email.clone());

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    info!(code = %link.code, attempt, "Link created with generated code");
                    return Ok(link);
                }
                Err(StoreError::DuplicateCode) => {
                    debug!(attempt, "Generated code collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            attempts = self.max_attempts,
            code_length = self.generator.length(),
            "Failed to allocate a unique code"
        );

        Err(AppError::allocation_exhausted(
            "Failed to generate a unique code",
            json!({ "attempts": self.max_attempts }),
        ))
    }
}
