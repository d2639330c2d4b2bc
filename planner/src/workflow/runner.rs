use crate::generator::profile::build_layout;
use crate::workflow::config::WorkflowConfig;
use anyhow::{bail, Context};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use uvcore::antenna::{load_layout, AntennaSet};
use uvcore::baseline::{
    compute_baseline_multiplicities, compute_baseline_multiplicities_parallel,
    BaselineMultiplicityMap,
};
use uvcore::math::bounds::{antenna_bounds, BoundingBox};
use uvcore::telemetry::{LogManager, MetricsRecorder};
use uvcore::uv::{frequency_bounds, redundancy, sample_plan, RedundancySummary, UvSample};
use uvcore::UvConfig;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub antennas: AntennaSet,
    pub multiplicities: BaselineMultiplicityMap,
    pub samples: Vec<UvSample>,
    pub antenna_bounds: Option<BoundingBox>,
    pub frequency_bounds: Option<BoundingBox>,
    pub summary: RedundancySummary,
    pub uv: UvConfig,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Reads the configured layout file, or builds the configured synthetic
    /// layout when no file is given.
    pub fn resolve_layout(&self) -> anyhow::Result<AntennaSet> {
        if let Some(path) = self.config.layout.as_ref() {
            return load_layout(path).map_err(|err| {
                self.metrics.record_error();
                anyhow::Error::new(err)
                    .context(format!("loading antenna layout {}", path.display()))
            });
        }
        if let Some(profile) = self.config.generator.as_ref() {
            return build_layout(profile).context("building synthetic layout");
        }
        bail!("no antenna layout configured: pass a layout file or a generator profile")
    }

    pub fn execute(&self, antennas: &AntennaSet) -> anyhow::Result<WorkflowResult> {
        let logger = LogManager::new("runner");
        self.config.validate().context("validating workflow config")?;

        let grid = self.config.snap_grid();
        let snapped = antennas
            .iter()
            .map(|p| {
                grid.snap_position(*p).with_context(|| {
                    format!(
                        "antenna ({}, {}) is outside the layout range after snapping with step {:?}",
                        p.x, p.y, grid.step
                    )
                })
            })
            .collect::<anyhow::Result<AntennaSet>>()?;
        if snapped.len() != antennas.len() {
            logger.record_failure(&format!(
                "snapping merged {} antennas",
                antennas.len() - snapped.len()
            ));
        }
        let antennas = snapped;

        let multiplicities = if self.config.parallel {
            compute_baseline_multiplicities_parallel(&antennas)
        } else {
            compute_baseline_multiplicities(&antennas)
        };

        let uv = self.config.uv;
        let summary = redundancy(&multiplicities);
        logger.record_summary(&summary);
        self.metrics.record_analysis(summary.total_pairs);

        Ok(WorkflowResult {
            samples: sample_plan(&multiplicities, &uv),
            antenna_bounds: antenna_bounds(&antennas),
            frequency_bounds: frequency_bounds(&multiplicities, &uv),
            antennas,
            multiplicities,
            summary,
            uv,
        })
    }
}

/// Writes the JSON report, creating parent directories as needed.
pub fn write_report<P: AsRef<Path>>(path: P, result: &WorkflowResult) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(result).context("serializing workflow report")?;
    fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}
