mod quadrant_repository;
mod spot_repository;

pub use quadrant_repository::PostgresQuadrantRepository;
pub use spot_repository::PostgresSpotRepository;
