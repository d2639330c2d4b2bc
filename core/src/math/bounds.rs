use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::antenna::AntennaSet;

/// Axis-aligned extent of a point collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grows every side by `margin`.
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Bounds of an N x 2 coordinate matrix; `None` when it has no rows.
    pub fn from_array(coords: ArrayView2<f64>) -> Option<Self> {
        if coords.nrows() == 0 || coords.ncols() < 2 {
            return None;
        }
        let mins = coords.fold_axis(Axis(0), f64::INFINITY, |acc, &v| f64::min(*acc, v));
        let maxs = coords.fold_axis(Axis(0), f64::NEG_INFINITY, |acc, &v| f64::max(*acc, v));
        Some(Self {
            min_x: mins[0],
            max_x: maxs[0],
            min_y: mins[1],
            max_y: maxs[1],
        })
    }
}

/// Component-wise extremes of `coords`, or `None` for an empty collection.
pub fn bounding_box<I>(coords: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut iter = coords.into_iter();
    let (x, y) = iter.next()?;
    let mut bounds = BoundingBox {
        min_x: x,
        max_x: x,
        min_y: y,
        max_y: y,
    };
    for (x, y) in iter {
        bounds.include(x, y);
    }
    Some(bounds)
}

pub fn antenna_bounds(antennas: &AntennaSet) -> Option<BoundingBox> {
    BoundingBox::from_array(antennas.to_array().view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::AntennaPosition;
    use ndarray::Array2;

    #[test]
    fn triangle_bounds() {
        let bounds = bounding_box([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                min_x: 0.0,
                max_x: 1.0,
                min_y: 0.0,
                max_y: 1.0
            }
        );
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        assert_eq!(bounding_box(Vec::new()), None);
        assert_eq!(BoundingBox::from_array(Array2::<f64>::zeros((0, 2)).view()), None);
        assert_eq!(antenna_bounds(&AntennaSet::new()), None);
    }

    #[test]
    fn array_and_iterator_bounds_agree() {
        let antennas: AntennaSet = [(-2.5, 4.0), (3.0, -1.0), (0.5, 7.25)]
            .into_iter()
            .map(AntennaPosition::from)
            .collect();
        let from_iter = bounding_box(antennas.iter().map(|p| (p.x, p.y)));
        assert_eq!(antenna_bounds(&antennas), from_iter);
        let bounds = from_iter.unwrap();
        assert_eq!(bounds.width(), 5.5);
        assert_eq!(bounds.height(), 8.25);
    }

    #[test]
    fn padding_grows_each_side() {
        let bounds = bounding_box([(0.0, 0.0), (2.0, 3.0)]).unwrap().padded(1.0);
        assert_eq!((bounds.min_x, bounds.max_x), (-1.0, 3.0));
        assert_eq!((bounds.min_y, bounds.max_y), (-1.0, 4.0));
    }
}
