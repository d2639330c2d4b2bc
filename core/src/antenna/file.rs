//! Plain-text layout files: one `<x>, <y>` record per line, metres.

use crate::antenna::{AntennaPosition, AntennaSet, MAX_COORDINATE_M};
use crate::prelude::{LayoutError, LayoutResult};
use log::debug;
use std::fs;
use std::path::Path;

/// Parses layout text. Blank lines are skipped and duplicate records collapse
/// onto the first occurrence.
pub fn parse_layout(contents: &str) -> LayoutResult<AntennaSet> {
    let mut antennas = AntennaSet::new();
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let position = parse_record(line).map_err(|reason| LayoutError::MalformedRecord {
            line: index + 1,
            content: line.to_string(),
            reason,
        })?;
        if !antennas.insert(position) {
            debug!("duplicate antenna on line {} ignored", index + 1);
        }
    }
    Ok(antennas)
}

fn parse_record(line: &str) -> Result<AntennaPosition, String> {
    let mut fields = line.split(',');
    let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
        return Err("expected two comma-separated values".into());
    };
    if fields.next().is_some() {
        return Err("expected exactly two values".into());
    }
    Ok(AntennaPosition::new(parse_coordinate(x)?, parse_coordinate(y)?))
}

fn parse_coordinate(field: &str) -> Result<f64, String> {
    let field = field.trim();
    let value: f64 = field
        .parse()
        .map_err(|err| format!("invalid coordinate {:?}: {}", field, err))?;
    if !value.is_finite() {
        return Err(format!("coordinate {:?} is not finite", field));
    }
    if value.abs() > MAX_COORDINATE_M {
        return Err(format!(
            "coordinate {:?} exceeds the {:e} m layout range",
            field, MAX_COORDINATE_M
        ));
    }
    Ok(value)
}

/// Renders a layout in iteration order. `f64` display output is the shortest
/// text that parses back to the same value.
pub fn format_layout(antennas: &AntennaSet) -> String {
    antennas
        .iter()
        .map(|position| format!("{}, {}\n", position.x, position.y))
        .collect()
}

pub fn load_layout<P: AsRef<Path>>(path: P) -> LayoutResult<AntennaSet> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let antennas = parse_layout(&contents)?;
    debug!("loaded {} antennas from {}", antennas.len(), path.display());
    Ok(antennas)
}

pub fn save_layout<P: AsRef<Path>>(path: P, antennas: &AntennaSet) -> LayoutResult<()> {
    let path = path.as_ref();
    fs::write(path, format_layout(antennas)).map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })
}
