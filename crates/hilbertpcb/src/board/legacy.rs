//! The `PCBNEW-BOARD Version 1` text format.
//!
//! Coordinates and widths are written as integer sub-units (1/10,000 inch).
//! The document is a fixed header, four outline records on the edge layer,
//! one track record per segment between `$TRACK` and `$EndTRACK`, and a fixed
//! footer.

use std::collections::HashMap;

use super::BoardDocument;
use crate::point::Segment;

/// Header template; `{{name}}` placeholders are filled by [`render`].
const HEADER: &str = include_str!("../../templates/legacy_header.tpl");
/// Footer template.
const FOOTER: &str = include_str!("../../templates/legacy_footer.tpl");

/// How far the `Di` bounding box extends past the outline, sub-units.
const BOUNDS_PAD: i64 = 101;
/// Edge-cuts layer number.
const EDGE_LAYER: u32 = 28;
/// Line width of outline records, sub-units.
const EDGE_WIDTH: i64 = 100;
/// Copper layer the heater is routed on.
const TRACK_LAYER: u32 = 15;

/// Substitute `{{name}}` placeholders from `ctx`. Unknown names are left in
/// place.
fn render_template(template: &str, ctx: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        match ctx.get(name) {
            Some(val) => out.push_str(val),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// A title safe to place inside the quoted, single-line `Title` field.
fn sheet_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '\n' | '\r' => ' ',
            c => c,
        })
        .collect()
}

/// The header, with the outline bounding box and track count filled in.
fn header(doc: &BoardDocument) -> String {
    let ctx = HashMap::from([
        ("xi", (doc.origin.x - BOUNDS_PAD).to_string()),
        ("yi", (doc.origin.y - BOUNDS_PAD).to_string()),
        ("xr", (doc.corner.x + BOUNDS_PAD).to_string()),
        ("yb", (doc.corner.y + BOUNDS_PAD).to_string()),
        ("tracks", doc.tracks.len().to_string()),
        ("title", sheet_title(&doc.title)),
    ]);
    render_template(HEADER, &ctx)
}

/// One outline record.
fn edge(s: &Segment) -> String {
    format!(
        "$DRAWSEGMENT\nPo 0 {} {} {} {} {EDGE_WIDTH}\nDe {EDGE_LAYER} 0 900 0 0\n$EndDRAWSEGMENT\n",
        s.start.x, s.start.y, s.end.x, s.end.y
    )
}

/// One track record.
fn track(s: &Segment, width: i64) -> String {
    format!(
        "Po 0 {} {} {} {} {width} -1\nDe {TRACK_LAYER} 0 0 0 0\n",
        s.start.x, s.start.y, s.end.x, s.end.y
    )
}

/// Render a complete board document.
pub fn render(doc: &BoardDocument) -> String {
    let mut out = header(doc);
    for s in &doc.outline {
        out.push_str(&edge(s));
    }
    out.push_str("$TRACK\n");
    for s in &doc.tracks {
        out.push_str(&track(s, doc.track_width));
    }
    out.push_str("$EndTRACK\n");
    out.push_str(FOOTER);
    out
}
