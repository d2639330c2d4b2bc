use anyhow::{bail, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uvcore::antenna::{AntennaPosition, AntennaSet, MAX_COORDINATE_M};
use uvcore::math::SnapGrid;

/// Synthetic antenna layouts used when no layout file is supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LayoutProfile {
    /// Central antenna plus three arms 120 degrees apart, MIRAS style.
    YArray {
        arm_elements: usize,
        spacing: f64,
        #[serde(default)]
        hub_radius: f64,
    },
    /// `rows` x `cols` lattice anchored at the origin.
    Grid {
        rows: usize,
        cols: usize,
        spacing: f64,
    },
    /// Uniform draws in `[-extent, extent]²`, snapped to the default step.
    Random {
        count: usize,
        extent: f64,
        #[serde(default)]
        seed: u64,
    },
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::YArray {
            arm_elements: 7,
            spacing: 0.875,
            hub_radius: 0.0,
        }
    }
}

/// Upper bound on the antennas a profile may produce. Analysis cost grows
/// with the square of this.
pub const MAX_GENERATED_ANTENNAS: usize = 4096;

fn check_positive(name: &str, value: f64) -> anyhow::Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{} must be a positive finite length, got {}", name, value);
    }
    Ok(())
}

fn check_count(kind: &str, count: Option<usize>) -> anyhow::Result<usize> {
    let count = count.with_context(|| format!("overflow computing antenna count for {}", kind))?;
    if count > MAX_GENERATED_ANTENNAS {
        bail!(
            "{} would place {} antennas, more than the {} allowed",
            kind,
            count,
            MAX_GENERATED_ANTENNAS
        );
    }
    Ok(count)
}

fn check_span(kind: &str, span: f64) -> anyhow::Result<()> {
    if span > MAX_COORDINATE_M {
        bail!(
            "{} reaches {} m from the origin, beyond the {:e} m layout range",
            kind,
            span,
            MAX_COORDINATE_M
        );
    }
    Ok(())
}

fn build_y_array(arm_elements: usize, spacing: f64, hub_radius: f64) -> anyhow::Result<AntennaSet> {
    check_positive("spacing", spacing)?;
    if !hub_radius.is_finite() || hub_radius < 0.0 {
        bail!("hub radius must be a non-negative finite length, got {}", hub_radius);
    }
    check_count(
        "Y array",
        arm_elements.checked_mul(3).and_then(|n| n.checked_add(1)),
    )?;
    check_span("Y array", hub_radius + arm_elements as f64 * spacing)?;

    let mut antennas = AntennaSet::new();
    antennas.insert(AntennaPosition::new(0.0, 0.0));
    for arm in 0..3 {
        let angle = PI / 2.0 + arm as f64 * 2.0 * PI / 3.0;
        let (sin, cos) = angle.sin_cos();
        for element in 1..=arm_elements {
            let radius = hub_radius + element as f64 * spacing;
            antennas.insert(AntennaPosition::new(radius * cos, radius * sin));
        }
    }
    Ok(antennas)
}

fn build_grid(rows: usize, cols: usize, spacing: f64) -> anyhow::Result<AntennaSet> {
    check_positive("spacing", spacing)?;
    check_count("grid", rows.checked_mul(cols))?;
    check_span("grid", rows.max(cols).saturating_sub(1) as f64 * spacing)?;
    Ok((0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| {
                AntennaPosition::new(col as f64 * spacing, row as f64 * spacing)
            })
        })
        .collect())
}

fn build_random(count: usize, extent: f64, seed: u64) -> anyhow::Result<AntennaSet> {
    check_positive("extent", extent)?;
    check_count("random layout", Some(count))?;
    check_span("random layout", extent)?;
    let grid = SnapGrid::default();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let draw = AntennaPosition::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            );
            grid.snap_position(draw).with_context(|| {
                format!("snapped draw ({}, {}) left the layout range", draw.x, draw.y)
            })
        })
        .collect()
}

pub fn build_layout(profile: &LayoutProfile) -> anyhow::Result<AntennaSet> {
    match *profile {
        LayoutProfile::YArray {
            arm_elements,
            spacing,
            hub_radius,
        } => build_y_array(arm_elements, spacing, hub_radius),
        LayoutProfile::Grid {
            rows,
            cols,
            spacing,
        } => build_grid(rows, cols, spacing),
        LayoutProfile::Random {
            count,
            extent,
            seed,
        } => build_random(count, extent, seed),
    }
}
