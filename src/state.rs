use std::sync::Arc;

use crate::database::InstitutionStore;
use crate::services::{InstitutionService, ResourceService};

/// Shared handler state. Cloned per request; every clone talks to the same
/// store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InstitutionStore>,
    pub institutions: InstitutionService,
    pub resources: ResourceService,
}

impl AppState {
    pub fn new(store: Arc<dyn InstitutionStore>) -> Self {
        Self {
            institutions: InstitutionService::new(store.clone()),
            resources: ResourceService::new(store.clone()),
            store,
        }
    }
}
