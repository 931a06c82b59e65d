use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while sizing, routing or emitting a heater trace.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Voltage or power cannot describe a physical operating point.
    #[error("invalid operating point {volts}V {watts}W: {reason}")]
    InvalidOperatingPoint {
        /// Requested supply voltage.
        volts: f64,
        /// Requested dissipation.
        watts: f64,
        /// What made the pair unusable.
        reason: &'static str,
    },

    /// The temperature rise target cannot size a trace.
    #[error("invalid temperature rise {rise}°C: must be positive and finite")]
    InvalidRise {
        /// Requested rise.
        rise: f64,
    },

    /// Board dimensions, clearances or margins are unusable.
    #[error("invalid board: {reason}")]
    InvalidBoard {
        /// What made the board unusable.
        reason: String,
    },

    /// A point or segment was requested past the end of a curve.
    #[error("index {index} out of range for curve with {length} entries")]
    IndexOutOfRange {
        /// Requested index.
        index: u32,
        /// Number of valid entries.
        length: u32,
    },

    /// The curve's index space would not fit in 32 bits.
    #[error("curve order {order} exceeds the maximum supported order {max}")]
    OrderTooLarge {
        /// Requested order.
        order: u32,
        /// Largest supported order.
        max: u32,
    },

    /// A trace was requested that the order search could not produce.
    #[error("no {which} trace: {reason}")]
    Unroutable {
        /// Which trace was requested ("minimum" or "maximum").
        which: &'static str,
        /// Why the search did not produce it.
        reason: String,
    },
}

impl Error {
    /// Create an invalid board error.
    pub fn invalid_board(reason: impl Into<String>) -> Self {
        Self::InvalidBoard {
            reason: reason.into(),
        }
    }

    /// True for errors caused by bad inputs rather than caller bugs.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperatingPoint { .. }
                | Self::InvalidRise { .. }
                | Self::InvalidBoard { .. }
                | Self::Unroutable { .. }
        )
    }
}
