//! Application state.

use std::sync::Arc;

use serde::Serialize;
use stockroom_core::{IdentityProvider, InventoryStore};
use stockroom_live::{Broadcaster, Registry};

use crate::config::Environment;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub registry: Arc<Registry>,
    pub broadcaster: Broadcaster,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InventoryStore>,
        identity: Arc<dyn IdentityProvider>,
        registry: Arc<Registry>,
        environment: Environment,
    ) -> Self {
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        Self {
            store,
            identity,
            registry,
            broadcaster,
            environment,
        }
    }

    /// Push an event to every connected dashboard.
    pub fn broadcast<E: Serialize + ?Sized>(&self, event: &E) {
        self.broadcaster.broadcast(event);
    }
}
