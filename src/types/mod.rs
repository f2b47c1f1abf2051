//! Data types for the grid view.

mod config;
mod coordinate;
mod geometry;

pub use config::*;
pub use coordinate::*;
pub use geometry::*;
