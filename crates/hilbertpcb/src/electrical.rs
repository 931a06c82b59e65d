//! Trace sizing for a resistive heater.
//!
//! Everything here works in mils, degrees Celsius, amps, volts and ohms. The
//! material constants describe 1 oz/ft² copper and are not configurable.

use crate::error::{Error, Result};

/// Thickness of 1 oz/ft² copper, in mils.
pub const COPPER_THICKNESS_MILS: f64 = 1.378;
/// Resistivity of copper (1.7e-6 ohm·cm) expressed in ohm·mils.
pub const COPPER_RESISTIVITY: f64 = 1.7 * 1e-6 * 393.700787;
/// Default temperature rise design target, in °C.
pub const DEFAULT_RISE_C: f64 = 100.0;

/// IPC-2221 constant for external layers.
const IPC_EXTERNAL_K: f64 = 0.048;
/// IPC-2221 temperature-rise exponent.
const IPC_RISE_EXP: f64 = 0.44;
/// IPC-2221 cross-section exponent.
const IPC_AREA_EXP: f64 = 0.725;

/// Minimum external-layer trace width for `amps` at a temperature rise of
/// `rise` °C, per IPC-2221.
pub fn min_width(amps: f64, rise: f64) -> f64 {
    (amps / (IPC_EXTERNAL_K * rise.powf(IPC_RISE_EXP))).powf(1.0 / IPC_AREA_EXP)
        / COPPER_THICKNESS_MILS
}

/// Width a trace of `length` mils needs to have a resistance of `ohms`.
pub fn width_for_length(length: f64, ohms: f64) -> f64 {
    COPPER_RESISTIVITY * length / (ohms * COPPER_THICKNESS_MILS)
}

/// Length a trace of `width` mils needs to have a resistance of `ohms`.
pub fn length_for_width(width: f64, ohms: f64) -> f64 {
    ohms * COPPER_THICKNESS_MILS * width / COPPER_RESISTIVITY
}

/// A validated supply voltage and power dissipation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Supply voltage.
    volts: f64,
    /// Target dissipation.
    watts: f64,
}

impl OperatingPoint {
    /// Validate a voltage/power pair. Both must be strictly positive and the
    /// derived current and resistance finite.
    pub fn new(volts: f64, watts: f64) -> Result<Self> {
        let fail = |reason| Error::InvalidOperatingPoint {
            volts,
            watts,
            reason,
        };
        if !(volts.is_finite() && volts > 0.0) {
            return Err(fail("voltage must be positive and finite"));
        }
        if !(watts.is_finite() && watts > 0.0) {
            return Err(fail("power must be positive and finite"));
        }
        let op = Self { volts, watts };
        if !(op.amps().is_finite() && op.amps() > 0.0 && op.ohms().is_finite()) {
            return Err(fail("current is not finite"));
        }
        Ok(op)
    }

    /// Supply voltage.
    pub fn volts(&self) -> f64 {
        self.volts
    }

    /// Target dissipation.
    pub fn watts(&self) -> f64 {
        self.watts
    }

    /// Current drawn at this operating point.
    pub fn amps(&self) -> f64 {
        self.watts / self.volts
    }

    /// Trace resistance that dissipates the target power.
    pub fn ohms(&self) -> f64 {
        self.volts / self.amps()
    }
}

/// A heater trace for a given operating point and temperature rise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatedTrace {
    /// Electrical operating point.
    op: OperatingPoint,
    /// Allowed temperature rise, °C.
    rise: f64,
}

impl HeatedTrace {
    /// A trace sized for the default 100 °C rise.
    pub fn new(op: OperatingPoint) -> Self {
        Self {
            op,
            rise: DEFAULT_RISE_C,
        }
    }

    /// Override the temperature rise target, °C. The rise must be positive
    /// and finite.
    pub fn with_rise(mut self, rise: f64) -> Result<Self> {
        if !(rise.is_finite() && rise > 0.0) {
            return Err(Error::InvalidRise { rise });
        }
        self.rise = rise;
        Ok(self)
    }

    /// The operating point this trace is sized for.
    pub fn operating_point(&self) -> OperatingPoint {
        self.op
    }

    /// Temperature rise target, °C.
    pub fn rise(&self) -> f64 {
        self.rise
    }

    /// Minimum width that carries the operating current within the rise.
    pub fn min_width(&self) -> f64 {
        min_width(self.op.amps(), self.rise)
    }

    /// Width that gives a trace of `length` mils the target resistance.
    pub fn width_for_length(&self, length: f64) -> f64 {
        width_for_length(length, self.op.ohms())
    }

    /// Length that gives a trace of `width` mils the target resistance.
    pub fn length_for_width(&self, width: f64) -> f64 {
        length_for_width(width, self.op.ohms())
    }

    /// One-line summary of the operating point, e.g.
    /// `12.00V 100.00W 8.33A 1.44ohms`.
    pub fn electrical_description(&self) -> String {
        format!(
            "{:.2}V {:.2}W {:.2}A {:.2}ohms",
            self.op.volts,
            self.op.watts,
            self.op.amps(),
            self.op.ohms()
        )
    }
}
