//! Serial console: turns received bytes into matrix frames and status updates.
//!
//! See [`Console`] for the per-byte behavior.

use crate::glyph;
use crate::pixel_matrix::{PixelMatrix, StripTransport};
use crate::status::StatusUpdate;
use crate::Result;

/// Side length of the digit matrix.
pub const MATRIX_SIZE: usize = glyph::GLYPH_SIZE;

/// The 5×5 matrix the console draws on.
pub type DigitMatrix<T> = PixelMatrix<T, MATRIX_SIZE, MATRIX_SIZE>;

/// Where received bytes come from.
///
/// `poll_byte` waits a bounded time and returns `Ok(None)` if nothing arrived,
/// so the caller's loop keeps running with no input.
pub trait ByteSource {
    /// Wait briefly for one byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serial`] if the receiver reports a fault.
    async fn poll_byte(&mut self) -> Result<Option<u8>>;
}

/// What one poll of the serial line leads to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialStep {
    /// A digit arrived; the matrix shows its glyph.
    Render(char),
    /// Some other byte arrived; only the status changes.
    StatusOnly(char),
    /// Nothing arrived.
    Idle,
}

impl SerialStep {
    /// Classify the result of one poll.
    #[must_use]
    pub fn from_poll(byte: Option<u8>) -> Self {
        match byte.map(char::from) {
            Some(symbol) if symbol.is_ascii_digit() => Self::Render(symbol),
            Some(symbol) => Self::StatusOnly(symbol),
            None => Self::Idle,
        }
    }

    /// Status update to publish for this step, if any.
    #[must_use]
    pub const fn status_update(self) -> Option<StatusUpdate> {
        match self {
            Self::Render(symbol) | Self::StatusOnly(symbol) => Some(StatusUpdate::Received(symbol)),
            Self::Idle => None,
        }
    }
}

/// Owns the digit matrix and applies received bytes to it.
///
/// A digit replaces the whole frame with its glyph and flushes it. Any other
/// byte leaves the matrix untouched.
pub struct Console<T> {
    matrix: DigitMatrix<T>,
}

impl<T: StripTransport> Console<T> {
    /// Wrap a strip transport in a blank matrix. Nothing is sent yet.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            matrix: PixelMatrix::new(transport),
        }
    }

    /// Blank the matrix and send the empty frame.
    pub async fn blank(&mut self) {
        self.matrix.clear();
        self.matrix.flush().await;
    }

    /// Apply one poll result.
    ///
    /// Returns the step taken so the caller can publish its status update.
    pub async fn handle(&mut self, byte: Option<u8>) -> SerialStep {
        let step = SerialStep::from_poll(byte);
        if let SerialStep::Render(symbol) = step {
            self.matrix.load(&glyph::lookup(symbol));
            self.matrix.flush().await;
        }
        step
    }

    /// Poll `source` once and apply the result.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; the matrix is untouched in that case.
    pub async fn poll_once<S: ByteSource>(&mut self, source: &mut S) -> Result<SerialStep> {
        let byte = source.poll_byte().await?;
        Ok(self.handle(byte).await)
    }

    /// The matrix being drawn on.
    #[must_use]
    pub const fn matrix(&self) -> &DigitMatrix<T> {
        &self.matrix
    }
}
