#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for status text and the status screen layout.

use digit_panel::debounce::ButtonId;
use digit_panel::dispatcher::ButtonEvent;
use digit_panel::status::{
    STARTUP_MESSAGE, STATUS_QUEUE_DEPTH, StatusChannel, StatusUpdate, TITLE, TextDisplay, publish,
    render_status,
};
use digit_panel::{Error, Result};
use embassy_futures::block_on;

#[derive(Debug, Eq, PartialEq)]
enum Call {
    Clear(bool),
    Draw(String, i32, i32),
    Commit,
}

#[derive(Default)]
struct RecordingDisplay {
    calls: Vec<Call>,
    fail_commit: bool,
}

impl TextDisplay for RecordingDisplay {
    fn clear(&mut self, invert: bool) -> Result<()> {
        self.calls.push(Call::Clear(invert));
        Ok(())
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) -> Result<()> {
        self.calls.push(Call::Draw(text.to_owned(), x, y));
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        if self.fail_commit {
            return Err(Error::Display);
        }
        self.calls.push(Call::Commit);
        Ok(())
    }
}

fn draw(text: &str, x: i32, y: i32) -> Call {
    Call::Draw(text.to_owned(), x, y)
}

#[test]
fn button_screen_has_title_and_two_lines_in_order() {
    let mut display = RecordingDisplay::default();
    let update = StatusUpdate::Button(ButtonEvent {
        button: ButtonId::A,
        level: true,
    });
    block_on(render_status(&mut display, &update)).expect("render succeeds");

    assert_eq!(
        display.calls,
        vec![
            Call::Clear(false),
            draw("== SHJORDAN ==", 8, 35),
            draw("Botao A", 0, 0),
            draw("LED Verde ON", 0, 20),
            Call::Commit,
        ]
    );
}

#[test]
fn received_screen_shows_the_symbol() {
    let mut display = RecordingDisplay::default();
    block_on(render_status(&mut display, &StatusUpdate::Received('7'))).expect("render succeeds");

    assert_eq!(
        display.calls,
        vec![
            Call::Clear(false),
            draw(TITLE, 8, 35),
            draw("Digito: 7", 0, 0),
            Call::Commit,
        ]
    );
}

#[test]
fn ready_screen_is_title_only() {
    let mut display = RecordingDisplay::default();
    block_on(render_status(&mut display, &StatusUpdate::Ready)).expect("render succeeds");
    assert_eq!(
        display.calls,
        vec![Call::Clear(false), draw(TITLE, 8, 35), Call::Commit]
    );
}

#[test]
fn commit_failure_is_propagated() {
    let mut display = RecordingDisplay {
        fail_commit: true,
        ..RecordingDisplay::default()
    };
    let result = block_on(render_status(&mut display, &StatusUpdate::Ready));
    assert!(matches!(result, Err(Error::Display)));
}

#[test]
fn log_lines_match_console_messages() {
    let blue_off = StatusUpdate::Button(ButtonEvent {
        button: ButtonId::B,
        level: false,
    });
    assert_eq!(blue_off.log_line().unwrap().as_str(), "LED Azul OFF");
    assert_eq!(
        blue_off.first_line().unwrap().as_deref(),
        Some("Botao B")
    );
    assert_eq!(
        StatusUpdate::Received('x').log_line().unwrap().as_str(),
        "Recebido: x"
    );
    assert_eq!(
        StatusUpdate::Ready.log_line().unwrap().as_str(),
        "Iniciando o programa..."
    );
    assert_eq!(
        StatusUpdate::Ready.log_line().unwrap().as_str(),
        STARTUP_MESSAGE
    );
}

#[test]
fn full_queue_drops_new_updates() {
    let channel = StatusChannel::new();
    let sender = channel.sender();
    for _ in 0..STATUS_QUEUE_DEPTH {
        assert!(publish(&sender, StatusUpdate::Ready));
    }
    assert!(!publish(&sender, StatusUpdate::Received('1')));

    let receiver = channel.receiver();
    for _ in 0..STATUS_QUEUE_DEPTH {
        assert_eq!(receiver.try_receive().ok(), Some(StatusUpdate::Ready));
    }
    assert!(receiver.try_receive().is_err());
}
