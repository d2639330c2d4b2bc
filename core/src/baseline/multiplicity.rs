use crate::antenna::{AntennaPosition, AntennaSet};
use crate::baseline::key::BaselineKey;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Count of ordered antenna pairs per quantized baseline.
///
/// Entries iterate in first-occurrence order over the `(p, q)` enumeration,
/// which viewers rely on for a stable annotation order. Counts always sum to
/// `N²` for an array of `N` antennas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaselineMultiplicityMap {
    entries: Vec<(BaselineKey, u64)>,
    index: HashMap<BaselineKey, usize>,
}

impl BaselineMultiplicityMap {
    fn record(&mut self, key: BaselineKey) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &BaselineKey) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BaselineKey, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = BaselineKey> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn entries(&self) -> &[(BaselineKey, u64)] {
        &self.entries
    }

    pub fn total_pairs(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn max_multiplicity(&self) -> u64 {
        self.entries.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }
}

impl Serialize for BaselineMultiplicityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

fn row_keys(p: &AntennaPosition, antennas: &[AntennaPosition]) -> Vec<BaselineKey> {
    antennas
        .iter()
        .map(|q| BaselineKey::from_vector(*p - *q))
        .collect()
}

/// Counts every ordered pair `(p, q)` of the array, self pairs included.
///
/// `p` walks the set in its iteration order and, for each `p`, `q` does the
/// same; the set is never re-sorted.
pub fn compute_baseline_multiplicities(antennas: &AntennaSet) -> BaselineMultiplicityMap {
    let positions = antennas.as_slice();
    let mut map = BaselineMultiplicityMap::default();
    for p in positions {
        for q in positions {
            map.record(BaselineKey::from_vector(*p - *q));
        }
    }
    map
}

/// Same result as [`compute_baseline_multiplicities`], including entry order.
///
/// Rows are keyed in parallel, then folded sequentially in row order.
pub fn compute_baseline_multiplicities_parallel(antennas: &AntennaSet) -> BaselineMultiplicityMap {
    let positions = antennas.as_slice();
    let rows: Vec<Vec<BaselineKey>> = positions
        .par_iter()
        .map(|p| row_keys(p, positions))
        .collect();

    let mut map = BaselineMultiplicityMap::default();
    for key in rows.into_iter().flatten() {
        map.record(key);
    }
    map
}
