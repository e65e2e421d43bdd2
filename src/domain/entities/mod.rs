//! Core domain entities.
//!
//! The service has a single entity, [`Link`]. Creation input is modeled
//! separately as [`NewLink`] so that counters and timestamps can only be
//! produced by the store.

pub mod link;

pub use link::{Link, NewLink};
