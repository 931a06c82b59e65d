use crate::{
    curve::{Hilbert, LatticeCurve},
    error::{Error, Result},
    point::{BoardPoint, Segment},
};

/// Path length of an order `order` curve centred on a square of side `edge`,
/// in the units of `edge`.
///
/// The curve has `4^order - 1` unit steps of `edge / 2^order`, which is
/// `(2^order - 2^-order) · edge`. Order 0 is a single point of length 0.
pub fn euclidean_length(order: u32, edge: f64) -> f64 {
    let side = 2f64.powi(order as i32);
    (side - 1.0 / side) * edge
}

/// A lattice curve laid out on a square board of side `edge` sub-units.
///
/// Each lattice cell maps to the centre of its `edge / 2^order` square, so
/// the outermost points sit half a cell inside the board outline.
#[derive(Debug, Clone)]
pub struct TraceCurve<C = Hilbert> {
    /// Index ↔ lattice mapping.
    curve: C,
    /// Board edge length, sub-units.
    edge: f64,
}

impl TraceCurve<Hilbert> {
    /// A Hilbert trace of `order` over a board edge of `edge` sub-units.
    pub fn new(order: u32, edge: f64) -> Result<Self> {
        Ok(Self::with_curve(Hilbert::new(order)?, edge))
    }
}

impl<C: LatticeCurve> TraceCurve<C> {
    /// Lay out an arbitrary lattice curve over a board edge of `edge`
    /// sub-units.
    pub fn with_curve(curve: C, edge: f64) -> Self {
        Self { curve, edge }
    }

    /// Recursion depth of the underlying curve.
    pub fn order(&self) -> u32 {
        self.curve.order()
    }

    /// Board edge length, sub-units.
    pub fn edge(&self) -> f64 {
        self.edge
    }

    /// Number of points, `4^order`.
    pub fn point_count(&self) -> u32 {
        self.curve.point_count()
    }

    /// Number of segments between consecutive points.
    pub fn segment_count(&self) -> u32 {
        self.point_count() - 1
    }

    /// Total path length in sub-units, from the closed form rather than by
    /// summing truncated segments.
    pub fn euclidean(&self) -> f64 {
        euclidean_length(self.order(), self.edge)
    }

    /// Board position of the point at `index`.
    pub fn point(&self, index: u32) -> Result<BoardPoint> {
        let length = self.point_count();
        if index >= length {
            return Err(Error::IndexOutOfRange { index, length });
        }
        let p = self.curve.point_at(index);
        let side = f64::from(self.curve.side());
        let offset = 1.0 / (2.0 * side);
        let scale = |v: u32| ((f64::from(v) / side + offset) * self.edge) as i64;
        Ok(BoardPoint::new(scale(p.x), scale(p.y)))
    }

    /// The segment joining point `index` to point `index + 1`.
    pub fn segment(&self, index: u32) -> Result<Segment> {
        let length = self.segment_count();
        if index >= length {
            return Err(Error::IndexOutOfRange { index, length });
        }
        Ok(Segment::new(self.point(index)?, self.point(index + 1)?))
    }

    /// All points in curve order.
    pub fn points(&self) -> impl Iterator<Item = BoardPoint> + '_ {
        (0..self.point_count()).filter_map(|i| self.point(i).ok())
    }

    /// All segments in curve order. Empty for order 0.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.segment_count()).filter_map(|i| self.segment(i).ok())
    }
}
