//! Time-window debouncing for the two push-buttons.
//!
//! See [`DebounceGate`] for the accept/reject rule.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

// ============================================================================
// Constants
// ============================================================================

/// Minimum gap, in milliseconds, between two accepted edges of the same button.
///
/// Shared by both buttons.
pub const DEBOUNCE_WINDOW_MS: u32 = 200;

/// Number of buttons on the board.
pub const BUTTON_COUNT: usize = 2;

// ============================================================================
// ButtonId - Which button fired
// ============================================================================

/// One of the two logical buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button A, which toggles the green LED.
    A,
    /// Button B, which toggles the blue LED.
    B,
}

impl ButtonId {
    /// Both buttons, in index order.
    pub const ALL: [Self; BUTTON_COUNT] = [Self::A, Self::B];

    /// Position of this button in per-button arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    /// The letter shown on the status display.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

// ============================================================================
// DebounceGate
// ============================================================================

/// Per-button last-accepted timestamps and the check-and-update rule that uses them.
///
/// An edge at `now_ms` is accepted iff `now_ms - last_accepted >= DEBOUNCE_WINDOW_MS`,
/// computed with wrapping `u32` subtraction so a rollover of the millisecond counter
/// between two presses still measures the true gap. Gaps longer than the counter
/// period (about 49.7 days) alias; that is an accepted limitation.
///
/// A button that has never been accepted accepts its first edge.
///
/// The check and the timestamp update happen inside one critical section, so a
/// second edge can never slip in between them even when the gate is shared
/// through a `&'static` reference.
///
/// # Example
///
/// ```rust
/// use digit_panel::debounce::{ButtonId, DebounceGate};
///
/// let gate = DebounceGate::new();
/// assert!(gate.should_accept(ButtonId::A, 1_000));
/// assert!(!gate.should_accept(ButtonId::A, 1_050)); // bounce
/// assert!(gate.should_accept(ButtonId::B, 1_050)); // other button is independent
/// assert!(gate.should_accept(ButtonId::A, 1_200));
/// ```
pub struct DebounceGate {
    last_accepted: Mutex<CriticalSectionRawMutex, Cell<[Option<u32>; BUTTON_COUNT]>>,
}

impl DebounceGate {
    /// Create a gate with no accepted presses.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_accepted: Mutex::new(Cell::new([None; BUTTON_COUNT])),
        }
    }

    /// Decide whether an edge of `button` at `now_ms` is a real press.
    ///
    /// Returns `true` and records `now_ms` as the new last-accepted time if the
    /// edge is outside the window; returns `false` and changes nothing otherwise.
    pub fn should_accept(&self, button: ButtonId, now_ms: u32) -> bool {
        self.last_accepted.lock(|cell| {
            let mut last_accepted = cell.get();
            let Some(slot) = last_accepted.get_mut(button.index()) else {
                return false;
            };
            let outside_window = match *slot {
                None => true,
                Some(last_ms) => now_ms.wrapping_sub(last_ms) >= DEBOUNCE_WINDOW_MS,
            };
            if outside_window {
                *slot = Some(now_ms);
                cell.set(last_accepted);
            }
            outside_window
        })
    }

    /// Last accepted time of `button`, if it has ever been accepted.
    #[must_use]
    pub fn last_accepted(&self, button: ButtonId) -> Option<u32> {
        self.last_accepted
            .lock(|cell| cell.get().get(button.index()).copied().flatten())
    }

    /// Forget every accepted press.
    pub fn reset(&self) {
        self.last_accepted.lock(|cell| cell.set([None; BUTTON_COUNT]));
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}
