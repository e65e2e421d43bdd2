//! Utility functions for code generation and input checking.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`link_input`] - Destination URL and owner email checks
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod link_input;
