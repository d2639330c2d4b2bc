//! Editing model behind an interactive layout canvas.
//!
//! Holds the antenna set and the snapping grid; rendering and input handling
//! belong to whatever front end drives it.

use crate::antenna::{AntennaPosition, AntennaSet};
use crate::baseline::{compute_baseline_multiplicities, BaselineMultiplicityMap};
use crate::math::bounds::{antenna_bounds, BoundingBox};
use crate::math::grid::SnapGrid;
use log::debug;

/// Half width of the view shown before any antenna exists, metres.
pub const DEFAULT_VIEW_LIMIT: f64 = 10.0;
/// Margin around loaded layouts when framing the view, metres.
pub const VIEW_MARGIN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    Placed(AntennaPosition),
    Moved(AntennaPosition),
    /// Another antenna already sits on the snapped target.
    Occupied(AntennaPosition),
    /// The antenna to move is not part of the layout.
    Missing,
    /// Target is non-finite or outside the layout range.
    Rejected,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEditor {
    antennas: AntennaSet,
    grid: SnapGrid,
}

impl LayoutEditor {
    pub fn new(grid: SnapGrid) -> Self {
        Self {
            antennas: AntennaSet::new(),
            grid,
        }
    }

    pub fn antennas(&self) -> &AntennaSet {
        &self.antennas
    }

    pub fn grid(&self) -> SnapGrid {
        self.grid
    }

    fn target(&self, x: f64, y: f64) -> Option<AntennaPosition> {
        self.grid.snap_position(AntennaPosition::new(x, y))
    }

    pub fn place(&mut self, x: f64, y: f64) -> EditOutcome {
        let Some(position) = self.target(x, y) else {
            return EditOutcome::Rejected;
        };
        if !self.antennas.insert(position) {
            return EditOutcome::Occupied(position);
        }
        debug!("placed antenna at ({}, {})", position.x, position.y);
        EditOutcome::Placed(position)
    }

    /// Drags `from` to the snapped `(x, y)`; the antenna keeps its order slot.
    pub fn move_antenna(&mut self, from: &AntennaPosition, x: f64, y: f64) -> EditOutcome {
        let Some(to) = self.target(x, y) else {
            return EditOutcome::Rejected;
        };
        if !self.antennas.contains(from) {
            return EditOutcome::Missing;
        }
        if self.antennas.replace(from, to) {
            EditOutcome::Moved(to)
        } else {
            EditOutcome::Occupied(to)
        }
    }

    pub fn remove(&mut self, position: &AntennaPosition) -> bool {
        self.antennas.remove(position)
    }

    pub fn undo_last(&mut self) -> Option<AntennaPosition> {
        self.antennas.pop_last()
    }

    pub fn clear(&mut self) {
        self.antennas.clear();
    }

    /// Replaces the whole layout, e.g. after reading a file.
    pub fn load(&mut self, antennas: AntennaSet) {
        self.antennas = antennas;
    }

    pub fn toggle_snap(&mut self) {
        self.grid.toggle();
    }

    pub fn analyze(&self) -> BaselineMultiplicityMap {
        compute_baseline_multiplicities(&self.antennas)
    }

    pub fn view_bounds(&self) -> BoundingBox {
        antenna_bounds(&self.antennas)
            .map(|bounds| bounds.padded(VIEW_MARGIN))
            .unwrap_or(BoundingBox {
                min_x: -DEFAULT_VIEW_LIMIT,
                max_x: DEFAULT_VIEW_LIMIT,
                min_y: -DEFAULT_VIEW_LIMIT,
                max_y: DEFAULT_VIEW_LIMIT,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_snaps_and_detects_occupied_cells() {
        let mut editor = LayoutEditor::default();
        assert_eq!(
            editor.place(1.1, 0.9),
            EditOutcome::Placed(AntennaPosition::new(1.0, 1.0))
        );
        assert_eq!(
            editor.place(0.95, 1.05),
            EditOutcome::Occupied(AntennaPosition::new(1.0, 1.0))
        );
        assert_eq!(editor.place(f64::NAN, 0.0), EditOutcome::Rejected);
        assert_eq!(editor.antennas().len(), 1);
    }

    #[test]
    fn placement_outside_layout_range_is_rejected() {
        let mut editor = LayoutEditor::default();
        assert_eq!(editor.place(1e13, 0.0), EditOutcome::Rejected);
        editor.place(2.0, 2.0);
        let from = AntennaPosition::new(2.0, 2.0);
        assert_eq!(editor.move_antenna(&from, 0.0, -1e300), EditOutcome::Rejected);
        assert!(editor.antennas().contains(&from));
    }

    #[test]
    fn free_placement_after_toggle() {
        let mut editor = LayoutEditor::default();
        editor.toggle_snap();
        assert_eq!(
            editor.place(1.1, 0.9),
            EditOutcome::Placed(AntennaPosition::new(1.1, 0.9))
        );
    }

    #[test]
    fn move_keeps_slot_and_refuses_collisions() {
        let mut editor = LayoutEditor::default();
        editor.place(0.0, 0.0);
        editor.place(1.0, 0.0);
        editor.place(2.0, 0.0);

        let from = AntennaPosition::new(0.0, 0.0);
        assert_eq!(
            editor.move_antenna(&from, 0.1, 3.1),
            EditOutcome::Moved(AntennaPosition::new(0.0, 3.0))
        );
        assert_eq!(editor.antennas().as_slice()[0], AntennaPosition::new(0.0, 3.0));

        let from = AntennaPosition::new(1.0, 0.0);
        assert_eq!(
            editor.move_antenna(&from, 2.0, 0.0),
            EditOutcome::Occupied(AntennaPosition::new(2.0, 0.0))
        );
        assert_eq!(
            editor.move_antenna(&AntennaPosition::new(9.0, 9.0), 5.0, 5.0),
            EditOutcome::Missing
        );
    }

    #[test]
    fn undo_removes_latest_placement() {
        let mut editor = LayoutEditor::default();
        editor.place(0.0, 0.0);
        editor.place(1.0, 0.0);
        assert_eq!(editor.undo_last(), Some(AntennaPosition::new(1.0, 0.0)));
        assert_eq!(editor.undo_last(), Some(AntennaPosition::new(0.0, 0.0)));
        assert_eq!(editor.undo_last(), None);
    }

    #[test]
    fn view_bounds_default_and_framed() {
        let mut editor = LayoutEditor::default();
        assert_eq!(editor.view_bounds().max_x, DEFAULT_VIEW_LIMIT);
        editor.place(2.0, -1.0);
        editor.place(4.0, 3.0);
        let bounds = editor.view_bounds();
        assert_eq!((bounds.min_x, bounds.max_x), (1.0, 5.0));
        assert_eq!((bounds.min_y, bounds.max_y), (-2.0, 4.0));
    }

    #[test]
    fn analyze_reflects_current_layout() {
        let mut editor = LayoutEditor::default();
        editor.place(0.0, 0.0);
        editor.place(0.5, 0.0);
        assert_eq!(editor.analyze().total_pairs(), 4);
        editor.clear();
        assert!(editor.analyze().is_empty());
    }
}
