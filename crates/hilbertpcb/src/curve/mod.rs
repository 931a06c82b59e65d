//! Space-filling curves scaled onto a board.
//!
//! A [`LatticeCurve`] enumerates the cells of a `2^order × 2^order` lattice;
//! a [`TraceCurve`] owns one and places its cells on a square board edge in
//! sub-units.

use std::fmt::Debug;

use crate::point::GridPoint;

/// The 2D Hilbert curve.
pub mod hilbert;
/// Lattice curves scaled to physical board units.
pub mod trace;

pub use hilbert::Hilbert;
pub use trace::{TraceCurve, euclidean_length};

/// Largest supported order: `4^order` indices must fit in a `u32`.
pub const MAX_ORDER: u32 = 15;

/// An index ↔ lattice mapping over a square `2^order` grid.
pub trait LatticeCurve: Debug {
    /// Recursion depth of the curve.
    fn order(&self) -> u32;

    /// Lattice cell visited at `index`. Callers guarantee
    /// `index < point_count()`.
    fn point_at(&self, index: u32) -> GridPoint;

    /// Index at which the curve visits `p`.
    fn index_of(&self, p: GridPoint) -> u32;

    /// Cells along one side of the lattice.
    fn side(&self) -> u32 {
        1 << self.order()
    }

    /// Total number of lattice cells, `4^order`.
    fn point_count(&self) -> u32 {
        1 << (2 * self.order())
    }
}
