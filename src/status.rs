//! Status messages for the text display and the serial log.
//!
//! Button presses and received bytes become a [`StatusUpdate`]. Producers push
//! updates into a [`StatusChannel`]; a single consumer renders them with
//! [`render_status`] onto any [`TextDisplay`] and logs them. The edge handler
//! therefore never waits on the display bus, at the cost of a short delay
//! between a press and the refreshed screen.

use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use heapless::String;

use crate::dispatcher::ButtonEvent;
use crate::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Title drawn on every status screen.
pub const TITLE: &str = "== SHJORDAN ==";

/// Pixel offset of the title.
pub const TITLE_POSITION: (i32, i32) = (8, 35);

/// Pixel offset of the first status line.
pub const FIRST_LINE_POSITION: (i32, i32) = (0, 0);

/// Pixel offset of the second status line.
pub const SECOND_LINE_POSITION: (i32, i32) = (0, 20);

/// Logged once the startup delay has passed, and again when the panel is ready.
pub const STARTUP_MESSAGE: &str = "Iniciando o programa...";

/// Capacity, in bytes, of one status line.
pub const STATUS_LINE_CAPACITY: usize = 32;

/// Number of updates that can wait for the display before new ones are dropped.
pub const STATUS_QUEUE_DEPTH: usize = 4;

/// One line of status text.
pub type StatusLine = String<STATUS_LINE_CAPACITY>;

/// Queue from the producers (button task, main loop) to the display task.
pub type StatusChannel = Channel<CriticalSectionRawMutex, StatusUpdate, STATUS_QUEUE_DEPTH>;

/// Producer end of a [`StatusChannel`].
pub type StatusSender<'a> = Sender<'a, CriticalSectionRawMutex, StatusUpdate, STATUS_QUEUE_DEPTH>;

/// Consumer end of a [`StatusChannel`].
pub type StatusReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, StatusUpdate, STATUS_QUEUE_DEPTH>;

// ============================================================================
// StatusUpdate
// ============================================================================

/// Something worth showing on the display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusUpdate {
    /// Boot finished; only the title is shown.
    Ready,
    /// A debounced press toggled an LED.
    Button(ButtonEvent),
    /// A byte arrived on the serial console.
    Received(char),
}

impl StatusUpdate {
    /// Text for the first line, e.g. `"Botao A"` or `"Digito: 5"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatusTooLong`] if the text does not fit a [`StatusLine`].
    pub fn first_line(&self) -> Result<Option<StatusLine>> {
        let mut line = StatusLine::new();
        match self {
            Self::Ready => return Ok(None),
            Self::Button(event) => write!(line, "Botao {}", event.button.letter()),
            Self::Received(symbol) => write!(line, "Digito: {symbol}"),
        }
        .map_err(|_| Error::StatusTooLong)?;
        Ok(Some(line))
    }

    /// Text for the second line, e.g. `"LED Verde ON"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatusTooLong`] if the text does not fit a [`StatusLine`].
    pub fn second_line(&self) -> Result<Option<StatusLine>> {
        let Self::Button(event) = self else {
            return Ok(None);
        };
        let mut line = StatusLine::new();
        write!(line, "LED {} {}", event.led().label(), on_off(event.level))
            .map_err(|_| Error::StatusTooLong)?;
        Ok(Some(line))
    }

    /// Line written to the serial log for this update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatusTooLong`] if the text does not fit a [`StatusLine`].
    pub fn log_line(&self) -> Result<StatusLine> {
        match self {
            Self::Ready => StatusLine::try_from(STARTUP_MESSAGE)
                .map_err(|()| Error::StatusTooLong),
            Self::Button(_) => self.second_line()?.ok_or(Error::StatusTooLong),
            Self::Received(symbol) => {
                let mut line = StatusLine::new();
                write!(line, "Recebido: {symbol}").map_err(|_| Error::StatusTooLong)?;
                Ok(line)
            }
        }
    }
}

const fn on_off(level: bool) -> &'static str {
    if level { "ON" } else { "OFF" }
}

/// Queue `update` without waiting.
///
/// Returns `false` if the queue is full; the update is dropped in that case so
/// producers never stall behind a slow display.
pub fn publish(sender: &StatusSender<'_>, update: StatusUpdate) -> bool {
    sender.try_send(update).is_ok()
}

// ============================================================================
// TextDisplay - Monochrome text canvas
// ============================================================================

/// A small monochrome display that can draw strings at pixel offsets.
///
/// Drawing only touches an off-screen buffer; nothing is visible until
/// [`commit`](Self::commit) returns.
pub trait TextDisplay {
    /// Fill the buffer with background (`invert = false`) or foreground (`invert = true`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the buffer cannot be written.
    fn clear(&mut self, invert: bool) -> Result<()>;

    /// Draw `text` with its top-left corner at pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the buffer cannot be written.
    fn draw_string(&mut self, text: &str, x: i32, y: i32) -> Result<()>;

    /// Send the buffer to the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the transport fails.
    async fn commit(&mut self) -> Result<()>;
}

/// Draw the status screen for `update` and commit it.
///
/// The screen is cleared, the [`TITLE`] drawn, then up to two status lines.
///
/// # Errors
///
/// Propagates display errors and [`Error::StatusTooLong`].
pub async fn render_status<D: TextDisplay>(display: &mut D, update: &StatusUpdate) -> Result<()> {
    display.clear(false)?;
    display.draw_string(TITLE, TITLE_POSITION.0, TITLE_POSITION.1)?;
    if let Some(line) = update.first_line()? {
        display.draw_string(&line, FIRST_LINE_POSITION.0, FIRST_LINE_POSITION.1)?;
    }
    if let Some(line) = update.second_line()? {
        display.draw_string(&line, SECOND_LINE_POSITION.0, SECOND_LINE_POSITION.1)?;
    }
    display.commit().await
}
