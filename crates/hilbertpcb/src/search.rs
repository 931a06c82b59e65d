//! Search for the curve orders that bound a heater design.
//!
//! For each order from 1 upward the search computes the curve's closed-form
//! length on the board and the trace width that length needs to reach the
//! target resistance. The scan stops the first time the `2^order` parallel
//! runs of that width, plus clearances, no longer fit across the board edge.
//!
//! Two orders come out of the scan:
//!
//! - the *minimum* viable order: the first fitting order whose required width
//!   is strictly greater than the IPC-2221 minimum for the operating current;
//! - the *maximum* fitting order: the last order before the packing limit.
//!
//! The minimum is only sought among fitting orders, so whenever both are
//! reported `minimum.order <= maximum.order`.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    board::BoardSpec,
    curve::{MAX_ORDER, euclidean_length},
    electrical::HeatedTrace,
};

/// Geometry and electrical sizing of one curve order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderRecord {
    /// Curve order.
    pub order: u32,
    /// Path length of the curve, mils.
    pub length: f64,
    /// Trace width needed for the target resistance over that length, mils.
    pub width: f64,
}

/// How the order search ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Both a minimum viable and a maximum fitting order exist.
    Found {
        /// First fitting order whose width clears the electrical minimum.
        minimum: OrderRecord,
        /// Last order that fits the board.
        maximum: OrderRecord,
    },
    /// The packing limit was hit before any order cleared the electrical
    /// minimum. `maximum` is `None` when not even order 1 fits.
    MinimumNotFound {
        /// Last order that fits the board, if any.
        maximum: Option<OrderRecord>,
    },
    /// Every order up to the cap fits the board; the packing limit was never
    /// reached.
    CapReached {
        /// First order whose width clears the electrical minimum, if any.
        minimum: Option<OrderRecord>,
        /// The record at the cap.
        last: OrderRecord,
    },
}

impl SearchOutcome {
    /// The minimum viable order, when one was found.
    pub fn minimum(&self) -> Option<&OrderRecord> {
        match self {
            Self::Found { minimum, .. } => Some(minimum),
            Self::MinimumNotFound { .. } => None,
            Self::CapReached { minimum, .. } => minimum.as_ref(),
        }
    }

    /// The largest order known to fit. For [`SearchOutcome::CapReached`] this
    /// is the cap itself.
    pub fn maximum(&self) -> Option<&OrderRecord> {
        match self {
            Self::Found { maximum, .. } => Some(maximum),
            Self::MinimumNotFound { maximum } => maximum.as_ref(),
            Self::CapReached { last, .. } => Some(last),
        }
    }

    /// True when the packing limit was actually reached.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Self::CapReached { .. })
    }
}

/// Board width taken up by `2^order` parallel runs of `width`, with
/// `clearance` between runs and at both edges. All values in mils.
pub fn consumed_width(order: u32, width: f64, clearance: f64) -> f64 {
    let runs = 2f64.powi(order as i32);
    runs * width + (runs + 1.0) * clearance
}

/// Order search over one operating point and board.
#[derive(Debug, Clone, Copy)]
pub struct OrderSearch {
    /// Electrical sizing.
    trace: HeatedTrace,
    /// Board edge, mils.
    edge: f64,
    /// Clearance between runs, mils.
    clearance: f64,
    /// Highest order to evaluate.
    cap: u32,
}

impl OrderSearch {
    /// A search over `board` for the given trace, capped at [`MAX_ORDER`].
    pub fn new(trace: HeatedTrace, board: &BoardSpec) -> Self {
        Self {
            trace,
            edge: board.edge_mils(),
            clearance: board.clearance(),
            cap: MAX_ORDER,
        }
    }

    /// Lower the order cap. Values above [`MAX_ORDER`] are clamped.
    pub fn with_cap(mut self, cap: u32) -> Self {
        self.cap = cap.min(MAX_ORDER);
        self
    }

    /// Length and required width of the curve at `order`.
    pub fn record(&self, order: u32) -> OrderRecord {
        let length = euclidean_length(order, self.edge);
        OrderRecord {
            order,
            length,
            width: self.trace.width_for_length(length),
        }
    }

    /// Whether the curve described by `record` fits across the board edge.
    pub fn fits(&self, record: &OrderRecord) -> bool {
        consumed_width(record.order, record.width, self.clearance) <= self.edge
    }

    /// Scan orders upward from 1.
    pub fn run(&self) -> SearchOutcome {
        let min_width = self.trace.min_width();
        let mut minimum: Option<OrderRecord> = None;
        let mut maximum: Option<OrderRecord> = None;

        for order in 1..=self.cap {
            let record = self.record(order);
            debug!(
                order,
                length = record.length,
                width = record.width,
                consumed = consumed_width(order, record.width, self.clearance),
                edge = self.edge,
                "evaluated order"
            );

            if !self.fits(&record) {
                info!(
                    minimum = minimum.map(|r| r.order),
                    maximum = maximum.map(|r| r.order),
                    "packing limit reached at order {order}"
                );
                return match (minimum, maximum) {
                    (Some(minimum), Some(maximum)) => SearchOutcome::Found { minimum, maximum },
                    (_, maximum) => SearchOutcome::MinimumNotFound { maximum },
                };
            }

            maximum = Some(record);
            if minimum.is_none() && record.width > min_width {
                info!(order, width = record.width, min_width, "minimum viable order");
                minimum = Some(record);
            }
        }

        let last = self.record(self.cap);
        warn!(cap = self.cap, "order cap reached without hitting the packing limit");
        SearchOutcome::CapReached { minimum, last }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{electrical::OperatingPoint, error::Result};

    fn search(volts: f64, watts: f64, inches: f64) -> Result<SearchOutcome> {
        let trace = HeatedTrace::new(OperatingPoint::new(volts, watts)?);
        Ok(OrderSearch::new(trace, &BoardSpec::square(inches)?).run())
    }

    #[test]
    fn consumed() {
        assert_eq!(consumed_width(1, 10.0, 10.0), 50.0);
        assert_eq!(consumed_width(3, 2.5, 1.0), 29.0);
    }

    #[test]
    fn finds_both_orders() -> Result<()> {
        let outcome = search(12.0, 50.0, 5.0)?;
        let (min, max) = match outcome {
            SearchOutcome::Found { minimum, maximum } => (minimum, maximum),
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(min.order, 5);
        assert_eq!(max.order, 6);
        assert_eq!(min.length, 159_843.75);
        assert!(outcome.is_bounded());
        Ok(())
    }

    #[test]
    fn first_exceedance_is_kept() -> Result<()> {
        // Orders 5 and 6 both clear the 20.9 mil minimum on a 10 inch board
        // at 24V; the first one wins.
        let outcome = search(24.0, 100.0, 10.0)?;
        let min = outcome.minimum().copied();
        let max = outcome.maximum().copied();
        assert_eq!(min.map(|r| r.order), Some(5));
        assert_eq!(max.map(|r| r.order), Some(6));
        let trace = HeatedTrace::new(OperatingPoint::new(24.0, 100.0)?);
        let s = OrderSearch::new(trace, &BoardSpec::square(10.0)?);
        let first = (1..=MAX_ORDER)
            .map(|o| s.record(o))
            .find(|r| r.width > trace.min_width());
        assert_eq!(min.map(|r| r.order), first.map(|r| r.order));
        Ok(())
    }

    #[test]
    fn nothing_fits_a_tiny_board() -> Result<()> {
        assert_eq!(
            search(12.0, 100.0, 0.01)?,
            SearchOutcome::MinimumNotFound { maximum: None }
        );
        Ok(())
    }

    #[test]
    fn low_power_hits_the_cap() -> Result<()> {
        let outcome = search(1000.0, 1.0, 1000.0)?;
        match outcome {
            SearchOutcome::CapReached { minimum, last } => {
                assert_eq!(minimum.map(|r| r.order), Some(1));
                assert_eq!(last.order, MAX_ORDER);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!outcome.is_bounded());
        Ok(())
    }

    #[test]
    fn lowered_cap() -> Result<()> {
        let trace = HeatedTrace::new(OperatingPoint::new(12.0, 100.0)?);
        let s = OrderSearch::new(trace, &BoardSpec::square(5.0)?).with_cap(3);
        assert_eq!(
            s.run(),
            SearchOutcome::CapReached {
                minimum: None,
                last: s.record(3)
            }
        );
        assert_eq!(
            OrderSearch::new(trace, &BoardSpec::square(5.0)?)
                .with_cap(99)
                .cap,
            MAX_ORDER
        );
        Ok(())
    }
}
