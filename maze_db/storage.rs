use sqlx::PgPool;
use std::sync::Arc;

use maze_app::{repository::*, storage::Storage};

use crate::repository::*;

/// Hands out repositories sharing one connection pool. Every write is
/// committed on its own.
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Storage for PostgresStorage {
    fn quadrants(&self) -> Arc<dyn QuadrantRepository> {
        Arc::new(PostgresQuadrantRepository::new(self.pool.clone()))
    }

    fn spots(&self) -> Arc<dyn SpotRepository> {
        Arc::new(PostgresSpotRepository::new(self.pool.clone()))
    }
}
