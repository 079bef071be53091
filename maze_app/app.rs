use std::sync::Arc;

use crate::{
    storage::Storage,
    stores::{QuadrantService, QuadrantStore, SpotService, SpotStore},
};

/// Entry point used by the transport layer: both stores, sharing one storage.
#[derive(Clone)]
pub struct MazeApp {
    pub quadrants: Arc<dyn QuadrantStore>,
    pub spots: Arc<dyn SpotStore>,
}

impl MazeApp {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            quadrants: Arc::new(QuadrantService::new(storage.clone())),
            spots: Arc::new(SpotService::new(storage)),
        }
    }
}
