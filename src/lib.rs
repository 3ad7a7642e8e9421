//! Firmware for a Pico board with two buttons, an RGB LED, a 5×5 NeoPixel-style
//! (WS2812) matrix and a 128×64 SSD1306 display.
//!
//! Pressing button A toggles the green LED, button B the blue LED; each accepted
//! press is reported on the display and the serial console. Typing a digit on
//! the serial console draws that digit on the matrix.
//!
//! The hardware-independent parts ([`debounce`], [`dispatcher`], [`glyph`],
//! [`pixel_matrix`], [`status`], [`console`]) build and test on the host with
//! `cargo test --no-default-features --features host`.
//!
//! # Glossary
//!
//! - **Debounce:** suppressing the repeated edges a mechanical switch produces
//!   by requiring a minimum gap between accepted presses.
//! - **Glyph:** a fixed pattern of colored cells representing one symbol on the matrix.
//! - **Flush:** serializing the in-memory pixel buffer out to the LED strip.
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   the RP2040 state machines that generate the WS2812 bit timing.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: a board must be selected (unless testing with host feature)
#[cfg(all(not(feature = "pico1"), not(feature = "host")))]
compile_error!("Must enable the board feature 'pico1' (or 'host' for testing)");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the architecture feature 'arm' (or 'host' for testing)");

#[cfg(not(feature = "host"))]
pub mod board;
pub mod console;
pub mod debounce;
pub mod dispatcher;
mod error;
pub mod glyph;
#[cfg(not(feature = "host"))]
pub mod oled;
pub mod pixel_matrix;
#[cfg(not(feature = "host"))]
pub mod serial;
pub mod status;
#[cfg(feature = "host")]
pub mod to_png;
#[cfg(not(feature = "host"))]
pub mod ws2812;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
