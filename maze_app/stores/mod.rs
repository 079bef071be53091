mod quadrant_store;
mod spot_store;

pub use quadrant_store::{QuadrantService, QuadrantStore};
pub use spot_store::{SpotService, SpotStore};
