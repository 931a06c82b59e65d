//! Command handlers for the `hpcb` CLI.
//!
//! Each handler returns the text to emit; `main` decides where it goes.

use std::fmt::Write;

use anyhow::{Context, Result, bail};
use hilbertpcb::{
    BoardSpec, HeatedTrace, HeaterPlan, OperatingPoint, OrderRecord, SearchOutcome, TraceChoice,
    TraceCurve, units,
};
use tracing::info;

/// Output format for a generated board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `PCBNEW-BOARD Version 1` text.
    Legacy,
    /// JSON describing the outline and tracks.
    Json,
}

/// Inputs shared by `generate` and `search`.
#[derive(Clone, Copy, Debug)]
pub struct Design {
    /// Supply voltage.
    pub volts: f64,
    /// Power to dissipate, watts.
    pub watts: f64,
    /// Board side, inches.
    pub size: f64,
    /// Clearance between runs, mils.
    pub clearance: f64,
    /// Allowed temperature rise, °C.
    pub rise: f64,
    /// Drawing offset from the origin, sub-units.
    pub margin: i64,
}

impl Design {
    /// Validate the inputs and run the order search.
    fn plan(&self) -> Result<HeaterPlan> {
        let op = OperatingPoint::new(self.volts, self.watts)?;
        let trace = HeatedTrace::new(op).with_rise(self.rise)?;
        let board = BoardSpec::square(self.size)?
            .with_clearance(self.clearance)?
            .with_margin(self.margin)?;
        info!(
            description = %trace.electrical_description(),
            min_width = trace.min_width(),
            "searching orders"
        );
        Ok(HeaterPlan::new(trace, board))
    }
}

/// Describe one search record.
fn describe(label: &str, record: Option<&OrderRecord>) -> String {
    match record {
        Some(r) => format!(
            "{label}: order {} length {:.3}in width {:.2}mil",
            r.order,
            r.length / units::MILS_PER_INCH,
            r.width
        ),
        None => format!("{label}: none"),
    }
}

/// Run the search and summarise it.
pub fn search(design: &Design) -> Result<String> {
    let plan = design.plan()?;
    let trace = plan.trace();
    let outcome = plan.outcome();
    let mut out = String::new();
    writeln!(out, "{}", trace.electrical_description())?;
    writeln!(out, "minimum width: {:.2}mil", trace.min_width())?;
    let status = match outcome {
        SearchOutcome::Found { .. } => "found",
        SearchOutcome::MinimumNotFound { .. } => "minimum not found",
        SearchOutcome::CapReached { .. } => "order cap reached",
    };
    writeln!(out, "outcome: {status}")?;
    writeln!(out, "{}", describe("minimum", outcome.minimum()))?;
    writeln!(out, "{}", describe("maximum", outcome.maximum()))?;
    Ok(out)
}

/// Generate a board carrying the chosen trace.
pub fn generate(design: &Design, choice: TraceChoice, format: Format) -> Result<String> {
    let plan = design.plan()?;
    let doc = plan
        .document(choice)
        .with_context(|| format!("cannot route the {choice} trace"))?;
    info!(
        tracks = doc.tracks.len(),
        width = doc.track_width,
        "board generated"
    );
    Ok(match format {
        Format::Legacy => doc.to_legacy(),
        Format::Json => doc.to_json()? + "\n",
    })
}

/// List the board positions of every point on a curve.
pub fn points(order: u32, size: f64) -> Result<String> {
    if !(size.is_finite() && size > 0.0) {
        bail!("board size must be positive, got {size}");
    }
    let curve = TraceCurve::new(order, size * units::SUBUNITS_PER_INCH)?;
    let mut out = String::new();
    for (i, p) in curve.points().enumerate() {
        writeln!(out, "{i} {} {}", p.x, p.y)?;
    }
    Ok(out)
}
