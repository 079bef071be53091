pub mod mapping;
pub mod storage;

mod bootstrap;
mod connection;
mod models;
mod query;
mod repository;

pub use bootstrap::bootstrap_database;
pub use connection::{DbPool, establish_connection_pool, establish_test_connection_pool};
pub use repository::*;
pub use storage::PostgresStorage;
