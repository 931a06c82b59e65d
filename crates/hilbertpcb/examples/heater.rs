//! Size a 12V, 50W heater for a 5 inch board and print the search result.

use std::error::Error;

use hilbertpcb::{BoardSpec, HeatedTrace, HeaterPlan, OperatingPoint, TraceChoice};

fn main() -> Result<(), Box<dyn Error>> {
    let trace = HeatedTrace::new(OperatingPoint::new(12.0, 50.0)?);
    println!("{}", trace.electrical_description());
    println!("minimum width: {:.2} mil", trace.min_width());

    let plan = HeaterPlan::new(trace, BoardSpec::square(5.0)?);
    println!("{:?}", plan.outcome());

    let doc = plan.document(TraceChoice::Maximum)?;
    println!(
        "maximum trace: {} segments at {} sub-units wide",
        doc.tracks.len(),
        doc.track_width
    );

    Ok(())
}
