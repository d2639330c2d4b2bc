use crate::antenna::AntennaPosition;
use serde::{Deserialize, Serialize};

/// Default snapping step for placed antennas, metres.
pub const DEFAULT_STEP: f64 = 0.25;

/// Rounds placed coordinates onto a regular grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGrid {
    pub step: Option<f64>,
}

impl SnapGrid {
    pub fn new(step: Option<f64>) -> Self {
        Self {
            step: step.filter(|s| s.is_finite() && *s > 0.0),
        }
    }

    pub fn disabled() -> Self {
        Self { step: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.step.is_some()
    }

    pub fn snap(&self, x: f64, y: f64) -> (f64, f64) {
        match self.step {
            Some(step) => ((x / step).round() * step, (y / step).round() * step),
            None => (x, y),
        }
    }

    /// Snapped position, or `None` when the result leaves the representable
    /// range (non-finite input, or a step so small that `x / step` overflows).
    pub fn snap_position(&self, position: AntennaPosition) -> Option<AntennaPosition> {
        let snapped = AntennaPosition::from(self.snap(position.x, position.y));
        snapped.is_representable().then_some(snapped)
    }

    /// Flips between the default step and free placement.
    pub fn toggle(&mut self) {
        self.step = match self.step {
            Some(_) => None,
            None => Some(DEFAULT_STEP),
        };
    }
}

impl Default for SnapGrid {
    fn default() -> Self {
        Self {
            step: Some(DEFAULT_STEP),
        }
    }
}
