//! Per-router state: the record store the router was built for.

use crate::service::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        AppState { store }
    }
}
