use anyhow::Context;
use clap::{Parser, ValueEnum};
use generator::profile::LayoutProfile;
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use gui_bridge::model::VisualizationModel;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use uvcore::antenna::save_layout;
use workflow::config::WorkflowConfig;
use workflow::runner::{write_report, Runner, WorkflowResult};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GeneratorKind {
    YArray,
    Grid,
    Random,
}

#[derive(Parser)]
#[command(author, version, about = "Antenna array baseline planner")]
struct Args {
    /// Antenna layout file, one `x, y` record per line
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Build a synthetic layout instead of reading one
    #[arg(long, value_enum)]
    generate: Option<GeneratorKind>,
    /// Elements per arm (y-array), side length (grid) or draws (random)
    #[arg(long, default_value_t = 7)]
    count: usize,
    #[arg(long, default_value_t = 0.875)]
    spacing: f64,
    /// Half width of the square random antennas are drawn from
    #[arg(long, default_value_t = 10.0)]
    extent: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long)]
    frequency_mhz: Option<f64>,
    #[arg(long)]
    oversampling: Option<f64>,
    /// Snap antennas onto a grid with this step before analysis
    #[arg(long)]
    snap: Option<f64>,
    /// Key antenna pairs on the rayon thread pool
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Write the full analysis as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Write the analysed layout back out in the text format
    #[arg(long)]
    save_layout: Option<PathBuf>,
    /// Keep the GUI bridge alive for incoming layouts
    #[arg(long, default_value_t = false)]
    serve: bool,
}

impl Args {
    fn profile(&self) -> Option<LayoutProfile> {
        self.generate.map(|kind| match kind {
            GeneratorKind::YArray => LayoutProfile::YArray {
                arm_elements: self.count,
                spacing: self.spacing,
                hub_radius: 0.0,
            },
            GeneratorKind::Grid => LayoutProfile::Grid {
                rows: self.count,
                cols: self.count,
                spacing: self.spacing,
            },
            GeneratorKind::Random => LayoutProfile::Random {
                count: self.count,
                extent: self.extent,
                seed: self.seed,
            },
        })
    }

    fn workflow_config(&self) -> anyhow::Result<WorkflowConfig> {
        let mut config = match (self.workflow.as_ref(), self.layout.as_ref()) {
            (Some(path), _) => WorkflowConfig::load(path)?,
            (None, Some(layout)) => WorkflowConfig::from_layout(layout),
            (None, None) => WorkflowConfig::default(),
        };
        if let Some(layout) = self.layout.clone() {
            config.layout = Some(layout);
            config.generator = None;
        }
        if let Some(profile) = self.profile() {
            config.generator = Some(profile);
            config.layout = None;
        }
        if let Some(mhz) = self.frequency_mhz {
            config.uv.center_frequency_hz = mhz * 1e6;
        }
        if let Some(oversampling) = self.oversampling {
            config.uv.oversampling = oversampling;
        }
        if self.snap.is_some() {
            config.snap_step = self.snap;
        }
        config.parallel |= self.parallel;
        if self.report.is_some() {
            config.report = self.report.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_summary(result: &WorkflowResult) {
    let summary = &result.summary;
    println!(
        "Analysis -> antennas {}, pairs {}, unique baselines {} ({} independent), max multiplicity {}",
        summary.antennas,
        summary.total_pairs,
        summary.unique_baselines,
        summary.independent_baselines,
        summary.max_multiplicity
    );
    println!(
        "wavelength {:.6} m, footprint radius {:.6} m",
        result.uv.wavelength(),
        result.uv.footprint_radius()
    );
    for ((key, count), sample) in result.multiplicities.iter().zip(&result.samples) {
        let (dx, dy) = key.to_frequency();
        println!(
            "{:>12.6} {:>12.6}  u {:>10.4} v {:>10.4}  x{}",
            dx, dy, sample.u, sample.v, count
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = args.workflow_config()?;
    let runner = Arc::new(Runner::new(workflow_config.clone()));
    let antennas = runner.resolve_layout()?;
    info!("resolved layout with {} antennas", antennas.len());

    let result = runner.execute(&antennas)?;
    print_summary(&result);

    if let Some(path) = args.save_layout.as_ref() {
        save_layout(path, &result.antennas)
            .with_context(|| format!("saving layout {}", path.display()))?;
    }
    if let Some(path) = workflow_config.report.as_ref() {
        write_report(path, &result)?;
        info!("report written to {}", path.display());
    }

    if args.serve {
        let gui_bridge = GuiBridge::new(runner.clone());
        gui_bridge.publish(&VisualizationModel::from(&result));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the GUI bridge")?;
        runtime.block_on(gui_bridge.serve_until(gui_bind_address(), async {
            if let Err(err) = signal::ctrl_c().await {
                error!("failed to listen for Ctrl+C: {}", err);
            }
        }))?;
        let metrics = runner.metrics().snapshot();
        info!(
            "bridge stopped after {} analyses ({} errors)",
            metrics.analyses, metrics.errors
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_generator_overrides_layout_source() {
        let args = Args::parse_from([
            "planner",
            "--generate",
            "grid",
            "--count",
            "3",
            "--spacing",
            "0.5",
            "--frequency-mhz",
            "1400",
        ]);
        let config = args.workflow_config().unwrap();
        assert_eq!(
            config.generator,
            Some(LayoutProfile::Grid {
                rows: 3,
                cols: 3,
                spacing: 0.5
            })
        );
        assert_eq!(config.uv.center_frequency_hz, 1.4e9);
        assert!(config.layout.is_none());
    }

    #[test]
    fn cli_rejects_invalid_snap_step() {
        let args = Args::parse_from(["planner", "--layout", "a.txt", "--snap", "0"]);
        assert!(args.workflow_config().is_err());
    }
}
