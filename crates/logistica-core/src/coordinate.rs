//! Integer grid positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the world grid. `height` is metres above the datum and is
/// not part of the spatial index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub height: u16,
}

/// The planar (x, y) cell a [`Coordinate`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Coordinate {
    /// A coordinate at ground level.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, height: 0 }
    }

    pub fn with_height(x: i32, y: i32, height: u16) -> Self {
        Self { x, y, height }
    }

    pub fn cell(&self) -> GridCell {
        GridCell::new(self.x, self.y)
    }

    /// Squared distance in the x/y plane, ignoring height.
    pub fn plane_distance_squared_to(&self, other: &Coordinate) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance including height.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dz = f64::from(self.height) - f64::from(other.height);
        (self.plane_distance_squared_to(other) + dz * dz).sqrt()
    }

    /// Offset this coordinate. Every axis saturates at its type's bounds.
    pub fn offset_by(&self, dx: i32, dy: i32, dz: i32) -> Coordinate {
        let height = (i64::from(self.height) + i64::from(dz)).clamp(0, i64::from(u16::MAX));
        Coordinate {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            height: height as u16,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}m)", self.x, self.y, self.height)
    }
}
