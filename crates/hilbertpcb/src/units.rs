//! Length conversions shared by the electrical model, the curve and the board
//! writer.
//!
//! Three units are in play: millimetres, mils (thousandths of an inch, used by
//! the electrical model) and board sub-units (ten-thousandths of an inch, the
//! integer unit of the legacy board format). Conversions into sub-units
//! truncate toward zero.

/// Board sub-units per inch.
pub const SUBUNITS_PER_INCH: f64 = 10_000.0;
/// Mils per inch.
pub const MILS_PER_INCH: f64 = 1_000.0;
/// Board sub-units per mil.
pub const SUBUNITS_PER_MIL: f64 = SUBUNITS_PER_INCH / MILS_PER_INCH;

/// Convert mils to millimetres.
pub fn mm(mils: f64) -> f64 {
    mils * 0.0254
}

/// Convert millimetres to mils.
pub fn mils(mm: f64) -> f64 {
    mm * 39.3700787
}

/// Convert inches to mils.
pub fn inches_to_mils(inches: f64) -> f64 {
    inches * MILS_PER_INCH
}

/// Convert inches to whole board sub-units, truncating.
pub fn inches_to_subunits(inches: f64) -> i64 {
    (inches * SUBUNITS_PER_INCH) as i64
}

/// Convert mils to whole board sub-units, truncating.
pub fn mils_to_subunits(mils: f64) -> i64 {
    (mils * SUBUNITS_PER_MIL) as i64
}

/// Convert board sub-units to mils.
pub fn subunits_to_mils(subunits: f64) -> f64 {
    subunits / SUBUNITS_PER_MIL
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn mm_mils_roundtrip() {
        assert_relative_eq!(mils(mm(1000.0)), 1000.0, max_relative = 1e-8);
        assert_relative_eq!(mm(39.3700787), 1.0, max_relative = 1e-8);
    }

    #[test]
    fn subunits_truncate() {
        assert_eq!(inches_to_subunits(5.0), 50_000);
        assert_eq!(inches_to_subunits(0.00019), 1);
        assert_eq!(mils_to_subunits(53.913), 539);
        assert_eq!(mils_to_subunits(0.09), 0);
        assert_eq!(subunits_to_mils(50_000.0), 5_000.0);
    }
}
