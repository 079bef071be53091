mod helpers;
mod quadrant_handler;
mod spot_handler;

pub use helpers::*;
pub use quadrant_handler::*;
pub use spot_handler::*;
