use std::sync::Arc;

use researchdesk_core::ResearchService;

#[derive(Clone)]
pub struct AppState {
    service: Arc<ResearchService>,
}

impl AppState {
    pub fn new(service: ResearchService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> Arc<ResearchService> {
        self.service.clone()
    }
}
