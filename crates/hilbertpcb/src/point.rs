//! Lattice and board coordinates used by the trace curve.

use serde::{Deserialize, Serialize};

/// A cell coordinate on a `2^order × 2^order` curve lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl GridPoint {
    /// Construct a lattice point.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another lattice point. Consecutive points on a
    /// Hilbert curve are always exactly 1 apart.
    pub fn manhattan(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// A position on the board in sub-units (1/10,000 inch).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardPoint {
    /// Horizontal position.
    pub x: i64,
    /// Vertical position.
    pub y: i64,
}

impl BoardPoint {
    /// Construct a board point.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// This point shifted by `dx`, `dy`.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another board point, in sub-units.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }
}

/// A straight run of trace between two board points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the run.
    pub start: BoardPoint,
    /// End of the run.
    pub end: BoardPoint,
}

impl Segment {
    /// Construct a segment.
    pub fn new(start: BoardPoint, end: BoardPoint) -> Self {
        Self { start, end }
    }

    /// The same segment shifted by `dx`, `dy`.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.start.offset(dx, dy), self.end.offset(dx, dy))
    }

    /// Length of the segment in sub-units.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}
