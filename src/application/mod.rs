//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Link creation and collision handling
//! - [`services::resolution_service::ResolutionService`] - Redirect lookup with click counting
//! - [`services::link_service::LinkService`] - Link reads, listing and deletion

pub mod services;
