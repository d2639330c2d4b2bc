use crate::workflow::runner::WorkflowResult;
use serde::{Deserialize, Serialize};
use uvcore::antenna::AntennaSet;
use uvcore::math::BoundingBox;
use uvcore::uv::{RedundancySummary, UvSample};

/// Snapshot published to an external viewer: the layout, its u-v samples in
/// annotation order, and the extents needed to frame both plots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub antennas: AntennaSet,
    pub samples: Vec<UvSample>,
    pub antenna_bounds: Option<BoundingBox>,
    pub frequency_bounds: Option<BoundingBox>,
    pub summary: Option<RedundancySummary>,
    pub footprint_radius: f64,
}

impl From<&WorkflowResult> for VisualizationModel {
    fn from(result: &WorkflowResult) -> Self {
        Self {
            antennas: result.antennas.clone(),
            samples: result.samples.clone(),
            antenna_bounds: result.antenna_bounds,
            frequency_bounds: result.frequency_bounds,
            summary: Some(result.summary),
            footprint_radius: result.uv.footprint_radius(),
        }
    }
}
