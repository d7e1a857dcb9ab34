use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// The visible world-coordinate rectangle at a given moment. Recomputed
/// after every zoom/pan transition and pushed to overlay consumers as a
/// read-only snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: Point,
    pub max: Point,
}

impl Extent {
    /// Creates a new extent from two corner points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates an extent from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Gets the width of the extent
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the extent
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Gets the center point of the extent
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the extent contains a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks if the extent intersects with another extent
    pub fn intersects(&self, other: &Extent) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    /// Checks if the extent is valid (min <= max)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Returns this extent clamped into `[0, world_size]` on both axes
    pub fn clamped_to_world(&self, world_size: f64) -> Extent {
        Extent::new(
            Point::new(
                self.min.x.clamp(0.0, world_size),
                self.min.y.clamp(0.0, world_size),
            ),
            Point::new(
                self.max.x.clamp(0.0, world_size),
                self.max.y.clamp(0.0, world_size),
            ),
        )
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}
