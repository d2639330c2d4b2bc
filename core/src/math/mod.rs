pub mod bounds;
pub mod grid;
pub mod stats;

pub use bounds::{antenna_bounds, bounding_box, BoundingBox};
pub use grid::SnapGrid;
pub use stats::StatsHelper;
