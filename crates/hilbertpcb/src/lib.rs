//! Self-heating PCB traces routed along Hilbert curves.
//!
//! Given a supply voltage, a power to dissipate and a square board, this
//! crate sizes a copper trace with the IPC-2221 heating rule, routes it as a
//! Hilbert curve that fills the board, and writes the result as a legacy
//! `PCBNEW-BOARD` file (or JSON describing the same entities).
//!
//! The pieces, leaves first:
//!
//! - [`electrical`] converts between current, trace width and trace length;
//! - [`curve`] enumerates Hilbert curve points and segments in board units;
//! - [`search`] finds the curve orders bounding a workable design;
//! - [`board`] serialises an outline plus trace segments;
//! - [`plan`] ties them together.
//!
//! ```
//! use hilbertpcb::{BoardSpec, HeatedTrace, HeaterPlan, OperatingPoint, TraceChoice};
//!
//! let trace = HeatedTrace::new(OperatingPoint::new(12.0, 50.0)?);
//! let plan = HeaterPlan::new(trace, BoardSpec::square(5.0)?);
//! let doc = plan.document(TraceChoice::Maximum)?;
//! assert_eq!(doc.tracks.len(), 4095);
//! # Ok::<(), hilbertpcb::error::Error>(())
//! ```

/// Board outline and serialisation.
pub mod board;
/// Hilbert curves scaled to board units.
pub mod curve;
/// Trace sizing from voltage and power.
pub mod electrical;
/// Error types used across the crate.
pub mod error;
/// Heater generation from search to board document.
pub mod plan;
/// Lattice and board coordinates.
pub mod point;
/// Curve order search.
pub mod search;
/// Length unit conversions.
pub mod units;

pub use crate::{
    board::{BoardDocument, BoardSpec},
    curve::{Hilbert, LatticeCurve, MAX_ORDER, TraceCurve},
    electrical::{HeatedTrace, OperatingPoint},
    plan::{HeaterPlan, TraceChoice},
    search::{OrderRecord, OrderSearch, SearchOutcome},
};
