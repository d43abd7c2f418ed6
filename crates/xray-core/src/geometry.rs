//! Canonical pointer positions.
//!
//! Every input modality (mouse, touch start/move, touch end) is reduced to a
//! single `Point` in client coordinates before the recognizer sees it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Fallback position for events that carry no coordinates.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Absolute per-axis distance from `origin`.
    pub fn delta_from(self, origin: Point) -> (f32, f32) {
        ((self.x - origin.x).abs(), (self.y - origin.y).abs())
    }

    /// True when either axis drifted strictly more than `threshold` from
    /// `origin`. Axes are checked independently; this is not a radius test.
    pub fn exceeds(self, origin: Point, threshold: f32) -> bool {
        let (dx, dy) = self.delta_from(origin);
        dx > threshold || dy > threshold
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exceeds_on_either_axis() {
        let origin = Point::new(100.0, 100.0);
        assert!(Point::new(115.0, 100.0).exceeds(origin, 10.0));
        assert!(Point::new(100.0, 89.0).exceeds(origin, 10.0));
        assert!(!Point::new(105.0, 95.0).exceeds(origin, 10.0));
    }

    #[test]
    fn threshold_is_exclusive() {
        let origin = Point::new(0.0, 0.0);
        assert!(!Point::new(10.0, -10.0).exceeds(origin, 10.0));
        assert!(Point::new(10.5, 0.0).exceeds(origin, 10.0));
    }

    #[test]
    fn diagonal_drift_is_per_axis() {
        // 9px on both axes is ~12.7px away, still inside a 10px per-axis box.
        let origin = Point::new(50.0, 50.0);
        assert!(!Point::new(59.0, 59.0).exceeds(origin, 10.0));
    }
}
