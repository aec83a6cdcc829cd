use std::sync::Arc;
use concierge_store::ConsoleStore;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ConsoleStore>>,
}

impl AppState {
    pub fn new(store: ConsoleStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
