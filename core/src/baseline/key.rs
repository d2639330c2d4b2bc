use crate::antenna::BaselineVector;
use serde::{Deserialize, Serialize};

/// Scale applied before rounding: keys count micrometres.
pub const QUANTIZATION_SCALE: f64 = 1e6;

/// Largest baseline component a key holds exactly, about 9.22e12 m.
/// Longer components saturate at `±i64::MAX`.
pub const MAX_BASELINE_M: f64 = i64::MAX as f64 / QUANTIZATION_SCALE;

/// Integer encoding of a baseline at micrometre precision.
///
/// Baselines that are mathematically identical but differ in their last
/// floating point bits land on the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct BaselineKey {
    pub x: i64,
    pub y: i64,
}

impl BaselineKey {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn from_vector(vector: BaselineVector) -> Self {
        Self {
            x: quantize(vector.dx),
            y: quantize(vector.dy),
        }
    }

    /// Baseline value the key stands for (the quantized value, not the
    /// original difference).
    pub fn to_frequency(self) -> (f64, f64) {
        key_to_frequency(self)
    }

    /// Key of the reversed baseline `q - p`.
    pub fn negated(self) -> Self {
        Self {
            x: self.x.saturating_neg(),
            y: self.y.saturating_neg(),
        }
    }
}

// `as` saturates; the lower bound is pulled in to `-i64::MAX` so that
// quantization stays odd for out-of-range components too. NaN maps to 0.
fn quantize(component: f64) -> i64 {
    ((component * QUANTIZATION_SCALE).round() as i64).max(-i64::MAX)
}

/// Inverse of the quantization scale.
pub fn key_to_frequency(key: BaselineKey) -> (f64, f64) {
    (
        key.x as f64 / QUANTIZATION_SCALE,
        key.y as f64 / QUANTIZATION_SCALE,
    )
}

impl From<BaselineVector> for BaselineKey {
    fn from(vector: BaselineVector) -> Self {
        Self::from_vector(vector)
    }
}

impl From<[i64; 2]> for BaselineKey {
    fn from([x, y]: [i64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<BaselineKey> for [i64; 2] {
    fn from(key: BaselineKey) -> Self {
        [key.x, key.y]
    }
}
