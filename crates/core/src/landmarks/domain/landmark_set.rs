use serde::Serialize;

use crate::shared::point::Point2D;

/// Ordered facial landmarks.
///
/// Index ranges are the only way regions are addressed, so the order points
/// were emitted in is preserved exactly.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point2D>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in `start..end`, clipped to the set's length.
    pub fn span(&self, start: usize, end: usize) -> &[Point2D] {
        let end = end.min(self.points.len());
        let start = start.min(end);
        &self.points[start..end]
    }
}

impl From<Vec<Point2D>> for LandmarkSet {
    fn from(points: Vec<Point2D>) -> Self {
        Self::new(points)
    }
}
