//! Board outline, the document describing a routed board, and its
//! serialisations.

use serde::Serialize;

use crate::{
    error::{Error, Result},
    point::{BoardPoint, Segment},
    units,
};

/// Writer for the legacy `PCBNEW-BOARD` text format.
pub mod legacy;

/// Default clearance between adjacent trace runs, mils.
pub const DEFAULT_CLEARANCE_MILS: f64 = 10.0;
/// Default distance the drawing is shifted away from the origin, sub-units.
pub const DEFAULT_MARGIN: i64 = 10_000;

/// Physical board outline and manufacturing constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardSpec {
    /// Outline width, inches.
    width: f64,
    /// Outline height, inches.
    height: f64,
    /// Minimum gap between adjacent runs, mils.
    clearance: f64,
    /// Offset of the outline from the origin, sub-units.
    margin: i64,
}

impl BoardSpec {
    /// A rectangular board. Routing uses the shorter side as a square edge.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        for (name, v) in [("width", width), ("height", height)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::invalid_board(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }
        Ok(Self {
            width,
            height,
            clearance: DEFAULT_CLEARANCE_MILS,
            margin: DEFAULT_MARGIN,
        })
    }

    /// A square board of side `size` inches.
    pub fn square(size: f64) -> Result<Self> {
        Self::new(size, size)
    }

    /// Set the clearance between runs, mils.
    pub fn with_clearance(mut self, clearance: f64) -> Result<Self> {
        if !(clearance.is_finite() && clearance >= 0.0) {
            return Err(Error::invalid_board(format!(
                "clearance must be non-negative and finite, got {clearance}"
            )));
        }
        self.clearance = clearance;
        Ok(self)
    }

    /// Set the offset of the drawing from the origin, sub-units. Negative
    /// margins are rejected.
    pub fn with_margin(mut self, margin: i64) -> Result<Self> {
        if margin < 0 {
            return Err(Error::invalid_board(format!(
                "margin must be non-negative, got {margin}"
            )));
        }
        self.margin = margin;
        Ok(self)
    }

    /// Outline width, inches.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Outline height, inches.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Clearance between runs, mils.
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Drawing offset, sub-units.
    pub fn margin(&self) -> i64 {
        self.margin
    }

    /// Side of the square routing area, inches.
    pub fn edge_inches(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Side of the square routing area, mils.
    pub fn edge_mils(&self) -> f64 {
        units::inches_to_mils(self.edge_inches())
    }

    /// Side of the square routing area, sub-units (not truncated).
    pub fn edge_subunits(&self) -> f64 {
        self.edge_inches() * units::SUBUNITS_PER_INCH
    }

    /// Outline size in whole sub-units.
    pub fn size_subunits(&self) -> (i64, i64) {
        (
            units::inches_to_subunits(self.width),
            units::inches_to_subunits(self.height),
        )
    }
}

/// A routed board, in absolute sub-unit coordinates, ready to serialise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardDocument {
    /// Free-form title written into the sheet description.
    pub title: String,
    /// Top-left corner of the outline.
    pub origin: BoardPoint,
    /// Bottom-right corner of the outline.
    pub corner: BoardPoint,
    /// The four edges of the outline.
    pub outline: [Segment; 4],
    /// Trace width, sub-units.
    pub track_width: i64,
    /// Trace segments, shifted by the board margin.
    pub tracks: Vec<Segment>,
}

impl BoardDocument {
    /// Place `segments` (relative to the board's top-left corner) on `board`
    /// with a trace width of `track_width` sub-units.
    pub fn new(board: &BoardSpec, segments: &[Segment], track_width: i64) -> Self {
        let m = board.margin();
        let (w, h) = board.size_subunits();
        let origin = BoardPoint::new(m, m);
        let corner = BoardPoint::new(m + w, m + h);
        let top_right = BoardPoint::new(corner.x, origin.y);
        let bottom_left = BoardPoint::new(origin.x, corner.y);
        Self {
            title: String::new(),
            origin,
            corner,
            outline: [
                Segment::new(origin, top_right),
                Segment::new(origin, bottom_left),
                Segment::new(top_right, corner),
                Segment::new(bottom_left, corner),
            ],
            track_width,
            tracks: segments.iter().map(|s| s.offset(m, m)).collect(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render in the legacy board format.
    pub fn to_legacy(&self) -> String {
        legacy::render(self)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_dimensions() {
        assert!(BoardSpec::square(0.0).is_err());
        assert!(BoardSpec::new(5.0, -1.0).is_err());
        assert!(BoardSpec::square(f64::NAN).is_err());
        assert!(BoardSpec::square(5.0).and_then(|b| b.with_clearance(-1.0)).is_err());
        assert!(BoardSpec::square(5.0).and_then(|b| b.with_clearance(0.0)).is_ok());
        assert!(matches!(
            BoardSpec::square(5.0).and_then(|b| b.with_margin(-50_000)),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(BoardSpec::square(5.0).and_then(|b| b.with_margin(0)).is_ok());
    }

    #[test]
    fn routing_edge_is_shorter_side() -> Result<()> {
        let b = BoardSpec::new(6.0, 4.0)?;
        assert_eq!(b.edge_inches(), 4.0);
        assert_eq!(b.edge_mils(), 4_000.0);
        assert_eq!(b.edge_subunits(), 40_000.0);
        assert_eq!(b.size_subunits(), (60_000, 40_000));
        Ok(())
    }

    #[test]
    fn document_outline() -> Result<()> {
        let b = BoardSpec::square(1.0)?.with_margin(500)?;
        let doc = BoardDocument::new(&b, &[], 10);
        assert_eq!(doc.origin, BoardPoint::new(500, 500));
        assert_eq!(doc.corner, BoardPoint::new(10_500, 10_500));
        assert_eq!(doc.outline[2].start, BoardPoint::new(10_500, 500));
        assert!(doc.tracks.is_empty());
        Ok(())
    }

    #[test]
    fn json_describes_entities() -> Result<()> {
        let b = BoardSpec::square(1.0)?;
        let seg = Segment::new(BoardPoint::new(0, 0), BoardPoint::new(10, 0));
        let doc = BoardDocument::new(&b, &[seg], 5);
        let json: serde_json::Value =
            serde_json::from_str(&doc.to_json().expect("serialises")).expect("parses");
        assert_eq!(json["track_width"], 5);
        assert_eq!(json["tracks"][0]["start"]["x"], 10_000);
        assert_eq!(json["tracks"][0]["end"]["x"], 10_010);
        assert_eq!(json["outline"].as_array().map(Vec::len), Some(4));
        Ok(())
    }
}
