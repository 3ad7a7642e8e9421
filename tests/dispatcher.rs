#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for button edge handling.

use std::convert::Infallible;

use digit_panel::debounce::ButtonId;
use digit_panel::dispatcher::{ButtonEvent, EdgeOutcome, InputDispatcher, LedColor};
use digit_panel::status::StatusUpdate;
use digit_panel::Error;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Records every level written to it.
#[derive(Default)]
struct RecordingPin {
    writes: Vec<bool>,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.writes.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.writes.push(true);
        Ok(())
    }
}

/// Always fails.
struct BrokenPin;

#[derive(Debug)]
struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for BrokenPin {
    type Error = PinFault;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }
}

fn writes(dispatcher: &InputDispatcher<RecordingPin>, button: ButtonId) -> Vec<bool> {
    dispatcher
        .led_pin(button)
        .map(|pin| pin.writes.clone())
        .unwrap_or_default()
}

#[test]
fn press_bounce_press_toggles_twice() {
    let mut dispatcher = InputDispatcher::new(RecordingPin::default(), RecordingPin::default());

    let first = dispatcher
        .on_falling_edge(ButtonId::A, 0)
        .expect("pin write succeeds");
    let event = ButtonEvent {
        button: ButtonId::A,
        level: true,
    };
    assert_eq!(first, EdgeOutcome::Applied(event));
    let update = StatusUpdate::Button(event);
    assert_eq!(update.first_line().unwrap().as_deref(), Some("Botao A"));
    assert_eq!(
        update.second_line().unwrap().as_deref(),
        Some("LED Verde ON")
    );

    let bounce = dispatcher
        .on_falling_edge(ButtonId::A, 50)
        .expect("pin write succeeds");
    assert_eq!(bounce, EdgeOutcome::Rejected);
    assert!(dispatcher.level(ButtonId::A));

    let second = dispatcher
        .on_falling_edge(ButtonId::A, 250)
        .expect("pin write succeeds");
    assert_eq!(
        second,
        EdgeOutcome::Applied(ButtonEvent {
            button: ButtonId::A,
            level: false,
        })
    );
    assert_eq!(
        StatusUpdate::Button(ButtonEvent {
            button: ButtonId::A,
            level: false,
        })
        .second_line()
        .unwrap()
        .as_deref(),
        Some("LED Verde OFF")
    );

    assert_eq!(writes(&dispatcher, ButtonId::A), vec![true, false]);
    assert!(writes(&dispatcher, ButtonId::B).is_empty());
}

#[test]
fn button_b_drives_blue_led_only() {
    let mut dispatcher = InputDispatcher::new(RecordingPin::default(), RecordingPin::default());

    let outcome = dispatcher
        .on_falling_edge(ButtonId::B, 1_000)
        .expect("pin write succeeds");
    let EdgeOutcome::Applied(event) = outcome else {
        panic!("first press must be applied");
    };
    assert_eq!(event.led(), LedColor::Blue);
    assert_eq!(
        StatusUpdate::Button(event).second_line().unwrap().as_deref(),
        Some("LED Azul ON")
    );
    assert!(dispatcher.level(ButtonId::B));
    assert!(!dispatcher.level(ButtonId::A));
    assert_eq!(writes(&dispatcher, ButtonId::B), vec![true]);
    assert!(writes(&dispatcher, ButtonId::A).is_empty());
}

#[test]
fn rejected_edge_changes_nothing() {
    let mut dispatcher = InputDispatcher::new(RecordingPin::default(), RecordingPin::default());
    dispatcher
        .on_falling_edge(ButtonId::A, 100)
        .expect("pin write succeeds");

    let outcome = dispatcher
        .on_falling_edge(ButtonId::A, 150)
        .expect("rejection is not an error");

    assert_eq!(outcome, EdgeOutcome::Rejected);
    assert_eq!(dispatcher.gate().last_accepted(ButtonId::A), Some(100));
    assert_eq!(writes(&dispatcher, ButtonId::A), vec![true]);
}

#[test]
fn pin_failure_is_reported() {
    let mut dispatcher = InputDispatcher::new(BrokenPin, BrokenPin);
    let result = dispatcher.on_falling_edge(ButtonId::A, 0);
    assert!(matches!(result, Err(Error::Gpio)));
}

#[test]
fn state_reports_button_identity() {
    let dispatcher = InputDispatcher::new(RecordingPin::default(), RecordingPin::default());
    for button in ButtonId::ALL {
        let state = dispatcher.state(button).expect("every button has a state");
        assert_eq!(state.button(), button);
        assert!(!state.level());
    }
}

#[test]
fn interleaved_presses_each_reach_their_own_led() {
    let mut dispatcher = InputDispatcher::new(RecordingPin::default(), RecordingPin::default());
    let presses = [
        (ButtonId::A, 0, true),
        (ButtonId::B, 10, true),
        (ButtonId::B, 300, false),
        (ButtonId::A, 310, false),
        (ButtonId::A, 600, true),
    ];

    for (button, now_ms, level) in presses {
        let outcome = dispatcher
            .on_falling_edge(button, now_ms)
            .expect("pin write succeeds");
        assert_eq!(
            outcome,
            EdgeOutcome::Applied(ButtonEvent { button, level }),
            "{button:?} at {now_ms} ms"
        );
    }

    assert_eq!(writes(&dispatcher, ButtonId::A), vec![true, false, true]);
    assert_eq!(writes(&dispatcher, ButtonId::B), vec![true, false]);
    assert!(dispatcher.level(ButtonId::A));
    assert!(!dispatcher.level(ButtonId::B));
}
