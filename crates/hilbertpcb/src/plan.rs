//! Heater generation: search the orders for one operating point and board,
//! then materialise the chosen trace as a board document.

use std::fmt;

use tracing::info;

use crate::{
    board::{BoardDocument, BoardSpec},
    curve::TraceCurve,
    electrical::HeatedTrace,
    error::{Error, Result},
    point::Segment,
    search::{OrderRecord, OrderSearch, SearchOutcome},
    units,
};

/// Which end of the search range to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceChoice {
    /// The shortest trace that meets the electrical minimum width.
    Minimum,
    /// The longest trace that still fits the board.
    Maximum,
}

impl fmt::Display for TraceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
        })
    }
}

/// A searched heater design.
#[derive(Debug, Clone)]
pub struct HeaterPlan {
    /// Electrical sizing.
    trace: HeatedTrace,
    /// Board the heater is routed on.
    board: BoardSpec,
    /// Result of the order search.
    outcome: SearchOutcome,
}

impl HeaterPlan {
    /// Run the order search for `trace` on `board`.
    pub fn new(trace: HeatedTrace, board: BoardSpec) -> Self {
        let outcome = OrderSearch::new(trace, &board).run();
        Self {
            trace,
            board,
            outcome,
        }
    }

    /// Electrical sizing.
    pub fn trace(&self) -> &HeatedTrace {
        &self.trace
    }

    /// The board.
    pub fn board(&self) -> &BoardSpec {
        &self.board
    }

    /// The search outcome.
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// The search record for `choice`.
    ///
    /// Fails when the search did not produce that order, or, for the maximum,
    /// when the search stopped at the order cap rather than the packing limit.
    pub fn record(&self, choice: TraceChoice) -> Result<OrderRecord> {
        let unroutable = |reason: &str| Error::Unroutable {
            which: match choice {
                TraceChoice::Minimum => "minimum",
                TraceChoice::Maximum => "maximum",
            },
            reason: reason.to_string(),
        };
        match (choice, &self.outcome) {
            (TraceChoice::Maximum, SearchOutcome::CapReached { last, .. }) => Err(unroutable(
                &format!(
                    "packing limit not reached by order {}; board too large or power too low",
                    last.order
                ),
            )),
            (TraceChoice::Maximum, outcome) => outcome
                .maximum()
                .copied()
                .ok_or_else(|| unroutable("order 1 does not fit the board")),
            (TraceChoice::Minimum, outcome) => outcome.minimum().copied().ok_or_else(|| {
                unroutable("no fitting order needs a trace wider than the electrical minimum")
            }),
        }
    }

    /// The curve for `choice`, scaled to the board.
    pub fn curve(&self, choice: TraceChoice) -> Result<TraceCurve> {
        let record = self.record(choice)?;
        TraceCurve::new(record.order, self.board.edge_subunits())
    }

    /// Segments of the trace for `choice`, relative to the board corner.
    pub fn generate_trace(&self, choice: TraceChoice) -> Result<Vec<Segment>> {
        let curve = self.curve(choice)?;
        info!(
            order = curve.order(),
            segments = curve.segment_count(),
            "materialising {choice} trace"
        );
        Ok(curve.segments().collect())
    }

    /// Segments of the shortest trace that meets the minimum width.
    pub fn generate_min_trace(&self) -> Result<Vec<Segment>> {
        self.generate_trace(TraceChoice::Minimum)
    }

    /// Segments of the longest trace that fits the board.
    pub fn generate_max_trace(&self) -> Result<Vec<Segment>> {
        self.generate_trace(TraceChoice::Maximum)
    }

    /// A board document carrying the trace for `choice` at its required width.
    pub fn document(&self, choice: TraceChoice) -> Result<BoardDocument> {
        let record = self.record(choice)?;
        let segments = self.generate_trace(choice)?;
        let width = units::mils_to_subunits(record.width);
        let title = format!(
            "{} order {} {:.2}mil",
            self.trace.electrical_description(),
            record.order,
            record.width
        );
        Ok(BoardDocument::new(&self.board, &segments, width).with_title(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::electrical::OperatingPoint;

    fn plan(volts: f64, watts: f64, inches: f64) -> Result<HeaterPlan> {
        Ok(HeaterPlan::new(
            HeatedTrace::new(OperatingPoint::new(volts, watts)?),
            BoardSpec::square(inches)?,
        ))
    }

    #[test]
    fn max_trace_document() -> Result<()> {
        let p = plan(12.0, 50.0, 5.0)?;
        let doc = p.document(TraceChoice::Maximum)?;
        assert_eq!(doc.tracks.len(), 4usize.pow(6) - 1);
        // 53.95 mil
        assert_eq!(doc.track_width, 539);
        assert!(doc.title.starts_with("12.00V 50.00W"));
        Ok(())
    }

    #[test]
    fn min_trace_is_shorter() -> Result<()> {
        let p = plan(12.0, 50.0, 5.0)?;
        assert_eq!(p.generate_min_trace()?.len(), 4usize.pow(5) - 1);
        assert!(p.generate_min_trace()?.len() < p.generate_max_trace()?.len());
        Ok(())
    }

    #[test]
    fn tracks_stay_inside_outline() -> Result<()> {
        let p = plan(12.0, 50.0, 5.0)?;
        let doc = p.document(TraceChoice::Maximum)?;
        for s in &doc.tracks {
            for pt in [s.start, s.end] {
                assert!(pt.x > doc.origin.x && pt.x < doc.corner.x);
                assert!(pt.y > doc.origin.y && pt.y < doc.corner.y);
            }
        }
        Ok(())
    }

    #[test]
    fn missing_minimum_is_unroutable() -> Result<()> {
        let p = plan(12.0, 100.0, 5.0)?;
        assert!(matches!(
            p.generate_min_trace(),
            Err(Error::Unroutable {
                which: "minimum",
                ..
            })
        ));
        assert_eq!(p.record(TraceChoice::Maximum)?.order, 5);
        Ok(())
    }

    #[test]
    fn capped_maximum_is_unroutable() -> Result<()> {
        let p = plan(1000.0, 1.0, 1000.0)?;
        assert!(matches!(
            p.record(TraceChoice::Maximum),
            Err(Error::Unroutable {
                which: "maximum",
                ..
            })
        ));
        assert_eq!(p.record(TraceChoice::Minimum)?.order, 1);
        Ok(())
    }
}
