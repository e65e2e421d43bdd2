//! Business logic services for the application layer.

pub mod allocation_service;
pub mod link_service;
pub mod resolution_service;

pub use allocation_service::AllocationService;
pub use link_service::LinkService;
pub use resolution_service::ResolutionService;
