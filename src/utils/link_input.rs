//! Syntactic checks for destination URLs and owner emails.
//!
//! Destinations are stored exactly as submitted once they pass these checks;
//! nothing is normalized.

use url::Url;
use validator::ValidateEmail;

/// Errors that can occur while checking link input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LinkInputError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("URL must not contain control characters")]
    ControlCharacter,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Checks that `input` is an absolute `http` or `https` URL with a host.
///
/// # Errors
///
/// Returns [`LinkInputError::ControlCharacter`] if `input` contains tabs,
/// line breaks or other control characters; the stored string is sent
/// verbatim as a `Location` header.
/// Returns [`LinkInputError::InvalidUrl`] for unparsable or relative URLs.
/// Returns [`LinkInputError::UnsupportedProtocol`] for any other scheme
/// (`ftp:`, `javascript:`, `data:`, ...).
/// Returns [`LinkInputError::MissingHost`] if the URL has an empty host.
pub fn validate_destination_url(input: &str) -> Result<(), LinkInputError> {
    if input.chars().any(char::is_control) {
        return Err(LinkInputError::ControlCharacter);
    }

    let url = Url::parse(input).map_err(|e| LinkInputError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(LinkInputError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(LinkInputError::MissingHost),
    }
}

/// Checks that `input` has valid email syntax.
pub fn validate_owner_email(input: &str) -> Result<(), LinkInputError> {
    if input.validate_email() {
        Ok(())
    } else {
        Err(LinkInputError::InvalidEmail)
    }
}
