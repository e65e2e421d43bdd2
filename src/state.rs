//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AllocationService, LinkService, ResolutionService};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::CodeGenerator;

/// Services shared by all HTTP handlers.
///
/// All services share one repository, so the state is backend-agnostic.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService<dyn LinkRepository>>,
    pub resolution_service: Arc<ResolutionService<dyn LinkRepository>>,
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: CodeGenerator,
        max_allocation_attempts: usize,
    ) -> Self {
        Self {
            allocation_service: Arc::new(AllocationService::new(
                repository.clone(),
                generator,
                max_allocation_attempts,
            )),
            resolution_service: Arc::new(ResolutionService::new(repository.clone())),
            link_service: Arc::new(LinkService::new(repository)),
        }
    }
}
