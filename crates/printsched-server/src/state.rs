use printsched_core::SchedulerConfig;
use printsched_persist::InMemoryStore;
use std::sync::Arc;

/// Shared state handed to every handler. `store` is the reference
/// `InMemoryStore`; swapping in a durable backend means changing this one
/// field's type, not the route functions.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub config: Arc<SchedulerConfig>,
}

impl AppState {
    pub fn new(store: InMemoryStore, config: SchedulerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
