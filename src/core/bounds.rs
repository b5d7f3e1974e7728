use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Represents a bounding box in screen/pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates the square of half-size `radius` centered on `center`
    pub fn around(center: Point, radius: f64) -> Self {
        Self::new(
            Point::new(center.x - radius, center.y - radius),
            Point::new(center.x + radius, center.y + radius),
        )
    }

    /// Checks if the bounds intersect with another bounds.
    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }
}
