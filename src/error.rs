//! Crate-wide error type and [`Result`] alias.

use derive_more::{Display, Error};

/// Errors surfaced by the firmware.
///
/// Expected anomalies (a debounced edge, an unknown symbol, an out-of-range
/// pixel, a serial poll with no byte) are not errors and never show up here.
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The executor had no room for a task.
    #[cfg(not(feature = "host"))]
    #[display("task spawn failed: {_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// Writing an LED output pin failed.
    #[display("gpio write failed")]
    Gpio,

    /// The text display transport reported an error.
    #[display("display transport error")]
    Display,

    /// A display transaction did not finish within its time budget.
    #[display("display transaction timed out")]
    DisplayTimeout,

    /// The serial port reported a receive or transmit error.
    #[display("serial port error")]
    Serial,

    /// A status line did not fit its fixed-capacity buffer.
    #[display("status line too long")]
    StatusTooLong,
}

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
