//! Layout calculation modules for composition
//!
//! This module handles all the geometric calculations for collage rendering:
//! - Cell partitions (which region of the canvas each image position maps to)
//! - Dimension planning (canvas sizing from the images' own ratios)

mod cells;
mod planner;
mod types;

pub use cells::*;
pub use planner::*;
pub use types::*;
