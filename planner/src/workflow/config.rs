use crate::generator::profile::LayoutProfile;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uvcore::math::SnapGrid;
use uvcore::UvConfig;

/// Everything a planning run needs: where the layout comes from, how the
/// u-v plane is scaled, and where results go.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub layout: Option<PathBuf>,
    pub generator: Option<LayoutProfile>,
    pub uv: UvConfig,
    pub snap_step: Option<f64>,
    pub parallel: bool,
    pub report: Option<PathBuf>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_layout<P: Into<PathBuf>>(layout: P) -> Self {
        Self {
            layout: Some(layout.into()),
            ..Default::default()
        }
    }

    pub fn snap_grid(&self) -> SnapGrid {
        SnapGrid::new(self.snap_step)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.uv.is_valid() {
            bail!(
                "centre frequency ({} Hz) and oversampling ({}) must be positive",
                self.uv.center_frequency_hz,
                self.uv.oversampling
            );
        }
        if let Some(step) = self.snap_step {
            if !step.is_finite() || step <= 0.0 {
                bail!("snap step must be positive, got {}", step);
            }
        }
        Ok(())
    }
}
