mod quadrant_repository;
mod spot_repository;

pub use quadrant_repository::QuadrantRepository;
pub use spot_repository::SpotRepository;
