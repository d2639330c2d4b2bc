//! Conversion of quantized baselines into sampled spatial frequencies.

use crate::baseline::{key_to_frequency, BaselineKey, BaselineMultiplicityMap};
use crate::math::bounds::{bounding_box, BoundingBox};
use crate::math::stats::StatsHelper;
use serde::{Deserialize, Serialize};

pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// L-band centre frequency of MIRAS-style radiometers, Hz.
pub const DEFAULT_CENTER_FREQUENCY_HZ: f64 = 1413e6;
pub const DEFAULT_OVERSAMPLING: f64 = 2.0;

/// Observation parameters used to scale baselines into the u-v plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvConfig {
    pub center_frequency_hz: f64,
    pub oversampling: f64,
}

impl Default for UvConfig {
    fn default() -> Self {
        Self {
            center_frequency_hz: DEFAULT_CENTER_FREQUENCY_HZ,
            oversampling: DEFAULT_OVERSAMPLING,
        }
    }
}

impl UvConfig {
    pub fn wavelength(&self) -> f64 {
        SPEED_OF_LIGHT / self.center_frequency_hz
    }

    /// Metres of baseline to u-v units.
    pub fn scale(&self) -> f64 {
        self.oversampling / self.wavelength()
    }

    /// Radius of the disc drawn around each antenna and each sample.
    pub fn footprint_radius(&self) -> f64 {
        self.wavelength() / 2.0
    }

    pub fn is_valid(&self) -> bool {
        self.center_frequency_hz.is_finite()
            && self.center_frequency_hz > 0.0
            && self.oversampling.is_finite()
            && self.oversampling > 0.0
    }
}

/// One sampled point of the u-v plane and the number of pairs realising it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvSample {
    pub u: f64,
    pub v: f64,
    pub multiplicity: u64,
}

/// Samples in the map's entry order.
pub fn sample_plan(map: &BaselineMultiplicityMap, config: &UvConfig) -> Vec<UvSample> {
    let scale = config.scale();
    map.iter()
        .map(|(key, multiplicity)| {
            let (x, y) = key_to_frequency(key);
            UvSample {
                u: x * scale,
                v: y * scale,
                multiplicity,
            }
        })
        .collect()
}

pub fn frequency_bounds(map: &BaselineMultiplicityMap, config: &UvConfig) -> Option<BoundingBox> {
    let scale = config.scale();
    bounding_box(map.keys().map(|key| {
        let (x, y) = key_to_frequency(key);
        (x * scale, y * scale)
    }))
}

/// Headline numbers describing how redundant an array is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedundancySummary {
    pub antennas: usize,
    pub total_pairs: u64,
    pub unique_baselines: usize,
    /// Non-zero baselines counted once per `±b` pair; the sample at `-b` is
    /// the conjugate of the one at `b`.
    pub independent_baselines: usize,
    pub max_multiplicity: u64,
    pub zero_spacing: u64,
    /// Pair-weighted RMS baseline length, metres.
    pub rms_baseline_m: f64,
}

pub fn redundancy(map: &BaselineMultiplicityMap) -> RedundancySummary {
    let total_pairs = map.total_pairs();
    let rms_baseline_m = StatsHelper::weighted_rms(map.iter().map(|(key, count)| {
        let (x, y) = key_to_frequency(key);
        (x.hypot(y), count)
    }));
    RedundancySummary {
        antennas: (total_pairs as f64).sqrt().round() as usize,
        total_pairs,
        unique_baselines: map.len(),
        independent_baselines: map.keys().filter(|key| *key > key.negated()).count(),
        max_multiplicity: map.max_multiplicity(),
        zero_spacing: map.get(&BaselineKey::ZERO).unwrap_or(0),
        rms_baseline_m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::{AntennaPosition, AntennaSet};
    use crate::baseline::compute_baseline_multiplicities;
    use approx::assert_abs_diff_eq;

    fn triangle_map() -> BaselineMultiplicityMap {
        let antennas: AntennaSet = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]
            .into_iter()
            .map(AntennaPosition::from)
            .collect();
        compute_baseline_multiplicities(&antennas)
    }

    #[test]
    fn l_band_wavelength() {
        let config = UvConfig::default();
        assert_abs_diff_eq!(config.wavelength(), 0.212167344, epsilon = 1e-9);
        assert_abs_diff_eq!(config.footprint_radius(), 0.106083672, epsilon = 1e-9);
        assert_abs_diff_eq!(config.scale(), 9.42652, epsilon = 1e-5);
    }

    #[test]
    fn samples_follow_map_order() {
        let map = triangle_map();
        let config = UvConfig::default();
        let samples = sample_plan(&map, &config);
        assert_eq!(samples.len(), map.len());
        assert_eq!(samples[0].multiplicity, 3);
        assert_eq!((samples[0].u, samples[0].v), (0.0, 0.0));
        assert_abs_diff_eq!(samples[1].u, -config.scale(), epsilon = 1e-12);
        assert_abs_diff_eq!(samples[1].v, 0.0);
    }

    #[test]
    fn frequency_bounds_are_symmetric() {
        let config = UvConfig {
            center_frequency_hz: SPEED_OF_LIGHT,
            oversampling: 1.0,
        };
        let bounds = frequency_bounds(&triangle_map(), &config).unwrap();
        assert_abs_diff_eq!(bounds.min_x, -1.0);
        assert_abs_diff_eq!(bounds.max_x, 1.0);
        assert_abs_diff_eq!(bounds.min_y, -1.0);
        assert_abs_diff_eq!(bounds.max_y, 1.0);
        assert_eq!(frequency_bounds(&BaselineMultiplicityMap::default(), &config), None);
    }

    #[test]
    fn redundancy_of_triangle() {
        let summary = redundancy(&triangle_map());
        assert_eq!(summary.antennas, 3);
        assert_eq!(summary.total_pairs, 9);
        assert_eq!(summary.unique_baselines, 7);
        assert_eq!(summary.independent_baselines, 3);
        assert_eq!(summary.max_multiplicity, 3);
        assert_eq!(summary.zero_spacing, 3);
        // four unit baselines and two of length sqrt(2) over nine pairs
        assert_abs_diff_eq!(summary.rms_baseline_m, (8.0f64 / 9.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn independent_baselines_pair_up_mirrored_keys() {
        let antennas: AntennaSet = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.5)]
            .into_iter()
            .map(AntennaPosition::from)
            .collect();
        let map = compute_baseline_multiplicities(&antennas);
        let summary = redundancy(&map);
        assert_eq!(summary.unique_baselines, 11);
        assert_eq!(summary.independent_baselines, 5);
        assert_eq!(redundancy(&BaselineMultiplicityMap::default()).independent_baselines, 0);
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert!(UvConfig::default().is_valid());
        assert!(!UvConfig {
            oversampling: 0.0,
            ..Default::default()
        }
        .is_valid());
    }
}
