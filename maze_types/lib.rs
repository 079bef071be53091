pub mod common;
pub mod errors;
pub mod quadrant;
pub mod spot;

pub use errors::Result;
