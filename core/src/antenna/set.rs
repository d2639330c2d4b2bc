use crate::antenna::position::AntennaPosition;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Set of antenna positions whose iteration order is the order in which they
/// were placed.
///
/// The order slot of an antenna survives moves (`replace`), which keeps the
/// pair enumeration of the analyzer stable while a layout is being edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<AntennaPosition>", into = "Vec<AntennaPosition>")]
pub struct AntennaSet {
    order: Vec<AntennaPosition>,
    members: HashSet<AntennaPosition>,
}

impl AntennaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, position: &AntennaPosition) -> bool {
        self.members.contains(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AntennaPosition> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[AntennaPosition] {
        &self.order
    }

    /// Adds a position; returns `false` when an equal one is already present.
    pub fn insert(&mut self, position: AntennaPosition) -> bool {
        if !self.members.insert(position) {
            return false;
        }
        self.order.push(position);
        true
    }

    pub fn remove(&mut self, position: &AntennaPosition) -> bool {
        if !self.members.remove(position) {
            return false;
        }
        self.order.retain(|p| p != position);
        true
    }

    /// Moves `from` to `to` keeping its order slot.
    pub fn replace(&mut self, from: &AntennaPosition, to: AntennaPosition) -> bool {
        if from == &to {
            return self.contains(from);
        }
        if !self.contains(from) || self.contains(&to) {
            return false;
        }
        let Some(slot) = self.order.iter().position(|p| p == from) else {
            return false;
        };
        self.members.remove(from);
        self.members.insert(to);
        self.order[slot] = to;
        true
    }

    /// Removes the last order slot.
    pub fn pop_last(&mut self) -> Option<AntennaPosition> {
        let last = self.order.pop()?;
        self.members.remove(&last);
        Some(last)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// N x 2 matrix of the positions, rows in iteration order.
    pub fn to_array(&self) -> Array2<f64> {
        let mut array = Array2::zeros((self.order.len(), 2));
        for (mut row, position) in array.rows_mut().into_iter().zip(&self.order) {
            row[0] = position.x;
            row[1] = position.y;
        }
        array
    }
}

impl PartialEq for AntennaSet {
    /// Set equality; order is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for AntennaSet {}

impl Extend<AntennaPosition> for AntennaSet {
    fn extend<T: IntoIterator<Item = AntennaPosition>>(&mut self, iter: T) {
        for position in iter {
            self.insert(position);
        }
    }
}

impl FromIterator<AntennaPosition> for AntennaSet {
    fn from_iter<T: IntoIterator<Item = AntennaPosition>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl From<Vec<AntennaPosition>> for AntennaSet {
    fn from(positions: Vec<AntennaPosition>) -> Self {
        positions.into_iter().collect()
    }
}

impl From<AntennaSet> for Vec<AntennaPosition> {
    fn from(set: AntennaSet) -> Self {
        set.order
    }
}

impl<'a> IntoIterator for &'a AntennaSet {
    type Item = &'a AntennaPosition;
    type IntoIter = std::slice::Iter<'a, AntennaPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
