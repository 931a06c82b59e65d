//! Property and scenario tests for trace sizing and the order search.

#![allow(missing_docs, clippy::tests_outside_test_module)]

use approx::assert_relative_eq;
use hilbertpcb::{
    BoardSpec, HeatedTrace, OperatingPoint, OrderSearch, SearchOutcome,
    electrical::{length_for_width, min_width, width_for_length},
    error,
    search::consumed_width,
};
use proptest::prelude::*;

fn outcome(volts: f64, watts: f64, inches: f64) -> error::Result<SearchOutcome> {
    let trace = HeatedTrace::new(OperatingPoint::new(volts, watts)?);
    Ok(OrderSearch::new(trace, &BoardSpec::square(inches)?).run())
}

fn max_order(volts: f64, watts: f64, inches: f64) -> Option<u32> {
    outcome(volts, watts, inches)
        .expect("valid inputs")
        .maximum()
        .map(|r| r.order)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Width and length conversions undo each other.
    #[test]
    fn width_length_roundtrip(length in 1e-3f64..1e9, ohms in 1e-3f64..1e6) {
        let back = length_for_width(width_for_length(length, ohms), ohms);
        prop_assert!((back - length).abs() <= length * 1e-12);
    }

    /// A larger board never lowers the maximum fitting order.
    #[test]
    fn max_order_grows_with_board(watts in 10f64..500.0, a in 1f64..20.0, b in 1f64..20.0) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(max_order(12.0, watts, small) <= max_order(12.0, watts, large));
    }

    /// More power never raises the maximum fitting order.
    #[test]
    fn max_order_shrinks_with_power(inches in 1f64..20.0, a in 10f64..500.0, b in 10f64..500.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(max_order(12.0, high, inches) <= max_order(12.0, low, inches));
    }

    /// Whenever both orders are reported the minimum does not exceed the maximum.
    #[test]
    fn minimum_within_maximum(volts in 1f64..48.0, watts in 1f64..300.0, inches in 0.5f64..12.0) {
        let o = outcome(volts, watts, inches).expect("valid inputs");
        if let SearchOutcome::Found { minimum, maximum } = o {
            prop_assert!(minimum.order <= maximum.order);
        }
    }
}

#[test]
fn twelve_volts_hundred_watts_five_inches() -> error::Result<()> {
    let op = OperatingPoint::new(12.0, 100.0)?;
    assert_relative_eq!(op.amps(), 8.333_333_333_333_334, max_relative = 1e-15);

    let trace = HeatedTrace::new(op);
    let amps = 100.0 / 12.0;
    assert_eq!(
        trace.min_width(),
        (amps / (0.048 * 100f64.powf(0.44))).powf(1.0 / 0.725) / 1.378
    );
    assert_eq!(trace.min_width(), min_width(amps, 100.0));

    // Order 5 needs 53.91 mil, just under the 54.45 mil minimum; order 6 needs
    // 107.8 mil, which does not fit at a 78 mil pitch.
    let board = BoardSpec::square(5.0)?;
    let search = OrderSearch::new(trace, &board);
    let five = search.record(5);
    assert!(five.width < trace.min_width());
    assert!(search.record(6).width > trace.min_width());
    assert!(!search.fits(&search.record(6)));

    match search.run() {
        SearchOutcome::MinimumNotFound { maximum: Some(max) } => assert_eq!(max, five),
        other => panic!("unexpected outcome {other:?}"),
    }
    Ok(())
}

#[test]
fn twelve_volts_hundred_watts_six_inches() -> error::Result<()> {
    match outcome(12.0, 100.0, 6.0)? {
        SearchOutcome::Found { minimum, maximum } => {
            assert_eq!(minimum.order, 5);
            assert_eq!(maximum.order, 5);
            assert!(minimum.order <= maximum.order);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    Ok(())
}

#[test]
fn outcomes_are_distinguishable() -> error::Result<()> {
    assert!(matches!(outcome(12.0, 50.0, 5.0)?, SearchOutcome::Found { .. }));
    assert!(matches!(
        outcome(12.0, 100.0, 0.01)?,
        SearchOutcome::MinimumNotFound { maximum: None }
    ));
    assert!(matches!(
        outcome(1000.0, 1.0, 1000.0)?,
        SearchOutcome::CapReached { .. }
    ));
    Ok(())
}

#[test]
fn packing_uses_clearance() -> error::Result<()> {
    let trace = HeatedTrace::new(OperatingPoint::new(12.0, 50.0)?);
    let tight = BoardSpec::square(5.0)?.with_clearance(40.0)?;
    let s = OrderSearch::new(trace, &tight);
    let six = s.record(6);
    // 64 runs of 53.95 mil plus 65 gaps of 40 mil exceeds 5000 mil.
    assert!(consumed_width(6, six.width, 40.0) > 5_000.0);
    assert_eq!(s.run().maximum().map(|r| r.order), Some(5));
    Ok(())
}
