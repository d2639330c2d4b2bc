//! Baseline and spatial-frequency core for interferometric antenna arrays.
//!
//! Antennas placed on a plane are paired exhaustively; every pairwise
//! separation is quantized to micrometres and counted, giving the sampling
//! pattern and redundancy of the array in the u-v plane.

pub mod antenna;
pub mod baseline;
pub mod editor;
pub mod math;
pub mod prelude;
pub mod telemetry;
pub mod uv;

pub use baseline::{
    compute_baseline_multiplicities, compute_baseline_multiplicities_parallel, key_to_frequency,
};
pub use math::bounds::bounding_box;
pub use prelude::{
    AntennaPosition, AntennaSet, BaselineKey, BaselineMultiplicityMap, BoundingBox, LayoutError,
    LayoutResult, UvConfig, UvSample,
};
