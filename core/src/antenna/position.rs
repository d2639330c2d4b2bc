use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::Sub;

/// Largest coordinate magnitude an array may use, metres.
///
/// Any two positions inside this range differ by less than
/// [`MAX_BASELINE_M`](crate::baseline::MAX_BASELINE_M) per axis, so every
/// baseline of the array has its own key.
pub const MAX_COORDINATE_M: f64 = 4.0e12;

/// Planar position of an antenna phase centre. Units are metres.
///
/// Two positions are equal only when both coordinates compare exactly equal;
/// no tolerance is applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct AntennaPosition {
    pub x: f64,
    pub y: f64,
}

impl AntennaPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Finite and within [`MAX_COORDINATE_M`] on both axes.
    pub fn is_representable(&self) -> bool {
        self.x.abs() <= MAX_COORDINATE_M && self.y.abs() <= MAX_COORDINATE_M
    }

    /// Bit pattern used for hashing. Signed zeros share one pattern so that
    /// `Hash` agrees with `PartialEq`.
    fn hash_bits(&self) -> (u64, u64) {
        (canonical_bits(self.x), canonical_bits(self.y))
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for AntennaPosition {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

// NaN positions never reach a set: the file reader, the editor and the
// workflow runner only admit representable positions.
impl Eq for AntennaPosition {}

impl Hash for AntennaPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_bits().hash(state);
    }
}

impl From<(f64, f64)> for AntennaPosition {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for AntennaPosition {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<AntennaPosition> for [f64; 2] {
    fn from(position: AntennaPosition) -> Self {
        [position.x, position.y]
    }
}

impl From<AntennaPosition> for (f64, f64) {
    fn from(position: AntennaPosition) -> Self {
        (position.x, position.y)
    }
}

/// Separation between two antennas of the same array, `p - q`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineVector {
    pub dx: f64,
    pub dy: f64,
}

impl Sub for AntennaPosition {
    type Output = BaselineVector;

    fn sub(self, rhs: Self) -> BaselineVector {
        BaselineVector {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}
