//! Button edge handling: debounce, toggle, and LED output.
//!
//! See [`InputDispatcher`] for the state machine and usage.

use embedded_hal::digital::{OutputPin, PinState};
use portable_atomic::{AtomicBool, Ordering};

use crate::debounce::{BUTTON_COUNT, ButtonId, DebounceGate};
use crate::{Error, Result};

// ============================================================================
// ButtonState - Toggle level of one button's LED
// ============================================================================

/// Toggle state owned by the dispatcher for one button.
///
/// Created off. Only [`InputDispatcher`] writes it; the level is atomic so any
/// context may read it without tearing.
pub struct ButtonState {
    button: ButtonId,
    level: AtomicBool,
}

impl ButtonState {
    const fn new(button: ButtonId) -> Self {
        Self {
            button,
            level: AtomicBool::new(false),
        }
    }

    /// Which button this state belongs to.
    #[must_use]
    pub const fn button(&self) -> ButtonId {
        self.button
    }

    /// Current LED level (`true` = on).
    #[must_use]
    pub fn level(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }

    fn toggle(&self) -> bool {
        let level = !self.level();
        self.level.store(level, Ordering::Release);
        level
    }
}

// ============================================================================
// ButtonEvent / EdgeOutcome
// ============================================================================

/// The LED that a button drives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    /// Green LED, toggled by button A.
    Green,
    /// Blue LED, toggled by button B.
    Blue,
}

impl LedColor {
    /// The LED driven by `button`.
    #[must_use]
    pub const fn for_button(button: ButtonId) -> Self {
        match button {
            ButtonId::A => Self::Green,
            ButtonId::B => Self::Blue,
        }
    }

    /// Name shown on the status display (Portuguese, matching the board's labels).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Verde",
            Self::Blue => "Azul",
        }
    }
}

/// An accepted press: which button, and the LED level it produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    /// The button that was pressed.
    pub button: ButtonId,
    /// The new LED level (`true` = on).
    pub level: bool,
}

impl ButtonEvent {
    /// The LED this event switched.
    #[must_use]
    pub const fn led(self) -> LedColor {
        LedColor::for_button(self.button)
    }
}

/// Result of feeding one falling edge to the dispatcher.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The edge fell inside the debounce window and was ignored.
    Rejected,
    /// The edge was a real press; the LED was toggled.
    Applied(ButtonEvent),
}

// ============================================================================
// InputDispatcher
// ============================================================================

/// Edge handler for both buttons.
///
/// Each falling edge runs IDLE → DEBOUNCE_CHECK → APPLY → IDLE, or straight back
/// to IDLE when the [`DebounceGate`] rejects it. A rejected edge touches nothing.
/// An applied edge flips that button's [`ButtonState`], writes the new level to
/// its LED pin, and returns a [`ButtonEvent`] for the caller to hand to the
/// status queue. The dispatcher never talks to the display itself, so the edge
/// path stays short and cannot block on a bus.
///
/// # Example
///
/// ```rust
/// # use core::convert::Infallible;
/// use digit_panel::debounce::ButtonId;
/// use digit_panel::dispatcher::{EdgeOutcome, InputDispatcher};
/// # struct Pin;
/// # impl embedded_hal::digital::ErrorType for Pin { type Error = Infallible; }
/// # impl embedded_hal::digital::OutputPin for Pin {
/// #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// # }
///
/// let mut dispatcher = InputDispatcher::new(Pin, Pin);
/// assert!(matches!(
///     dispatcher.on_falling_edge(ButtonId::A, 5_000),
///     Ok(EdgeOutcome::Applied(_))
/// ));
/// assert!(dispatcher.level(ButtonId::A));
/// ```
pub struct InputDispatcher<P> {
    gate: DebounceGate,
    states: [ButtonState; BUTTON_COUNT],
    led_pins: [P; BUTTON_COUNT],
}

impl<P: OutputPin> InputDispatcher<P> {
    /// Create a dispatcher driving `green_led` for button A and `blue_led` for button B.
    ///
    /// Both LEDs start off; the pins are not written until the first press.
    #[must_use]
    pub const fn new(green_led: P, blue_led: P) -> Self {
        Self {
            gate: DebounceGate::new(),
            states: [ButtonState::new(ButtonId::A), ButtonState::new(ButtonId::B)],
            led_pins: [green_led, blue_led],
        }
    }

    /// Handle a falling edge of `button` observed at `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`] if the LED pin write fails. The toggle state has
    /// already flipped at that point, so the next press flips it back.
    pub fn on_falling_edge(&mut self, button: ButtonId, now_ms: u32) -> Result<EdgeOutcome> {
        if !self.gate.should_accept(button, now_ms) {
            return Ok(EdgeOutcome::Rejected);
        }

        let [state_a, state_b] = &self.states;
        let [pin_a, pin_b] = &mut self.led_pins;
        let (state, pin) = match button {
            ButtonId::A => (state_a, pin_a),
            ButtonId::B => (state_b, pin_b),
        };
        let level = state.toggle();
        pin.set_state(PinState::from(level))
            .map_err(|_| Error::Gpio)?;

        Ok(EdgeOutcome::Applied(ButtonEvent { button, level }))
    }

    /// Current LED level of `button`.
    #[must_use]
    pub fn level(&self, button: ButtonId) -> bool {
        self.states
            .get(button.index())
            .is_some_and(ButtonState::level)
    }

    /// Toggle state of `button`.
    #[must_use]
    pub fn state(&self, button: ButtonId) -> Option<&ButtonState> {
        self.states.get(button.index())
    }

    /// The debounce gate this dispatcher consults.
    #[must_use]
    pub const fn gate(&self) -> &DebounceGate {
        &self.gate
    }

    /// Borrow the LED pin driven by `button`.
    #[must_use]
    pub fn led_pin(&self, button: ButtonId) -> Option<&P> {
        self.led_pins.get(button.index())
    }
}
