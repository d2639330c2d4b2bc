use crate::uv::RedundancySummary;
use log::{info, warn};

/// Logging seam shared by the analysis entry points.
pub struct LogManager {
    context: &'static str,
}

impl LogManager {
    pub fn new(context: &'static str) -> Self {
        Self { context }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.context, message);
    }

    pub fn record_failure(&self, message: &str) {
        warn!("[{}] {}", self.context, message);
    }

    pub fn record_summary(&self, summary: &RedundancySummary) {
        info!(
            "[{}] antennas {} -> {} unique baselines over {} pairs (max multiplicity {}, rms {:.3} m)",
            self.context,
            summary.antennas,
            summary.unique_baselines,
            summary.total_pairs,
            summary.max_multiplicity,
            summary.rms_baseline_m
        );
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("uvcore")
    }
}
