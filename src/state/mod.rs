use std::sync::Arc;

use crate::services::poll_service::PollService;
use crate::store::PollStore;

#[derive(Clone)]
pub struct AppState {
    pub polls: PollService,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self {
            polls: PollService::new(store),
        }
    }
}
