//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Consistency
//!
//! Every cross-request guarantee (unique codes, exact click counts) is delegated
//! to the atomic operations of [`repositories::LinkRepository`]. Nothing in the
//! domain or application layers holds shared mutable state.

pub mod entities;
pub mod repositories;
