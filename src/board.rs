//! Pin map, peripheral bring-up, and the tasks that run the panel.
//!
//! [`run`] never returns on success. It owns the matrix and polls the serial
//! console; the button and status tasks it spawns own everything else.

use core::convert::Infallible;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c;
use embassy_rp::peripherals::{I2C1, PIO0, UART0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::uart::{self, BufferedInterruptHandler, Uart};
use embassy_time::{Duration, Instant, Timer, with_timeout};
use static_cell::StaticCell;

use crate::console::Console;
use crate::debounce::ButtonId;
use crate::dispatcher::{EdgeOutcome, InputDispatcher};
use crate::oled::Oled;
use crate::serial::{BAUD_RATE, SerialRx, SerialTx};
use crate::status::{
    self, StatusChannel, StatusReceiver, StatusSender, StatusUpdate, render_status,
};
use crate::ws2812::PioWs2812Transport;
use crate::{Error, Result};

// ============================================================================
// Timing
// ============================================================================

/// Wait after reset before touching any peripheral.
pub const STARTUP_DELAY: Duration = Duration::from_secs(2);

/// Pause between two serial polls of the main loop.
pub const IDLE_DELAY: Duration = Duration::from_millis(10);

/// Budget for one display transaction; a slower one is abandoned.
pub const DISPLAY_TIMEOUT: Duration = Duration::from_millis(100);

const UART_BUFFER_SIZE: usize = 64;

// ============================================================================
// Statics
// ============================================================================

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

static STATUS_CHANNEL: StatusChannel = StatusChannel::new();
static UART_TX_BUFFER: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();
static UART_RX_BUFFER: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();

/// Milliseconds since boot, truncated to 32 bits.
///
/// Wraps after about 49.7 days; the debounce gate compares with wrapping
/// arithmetic.
#[must_use]
pub fn now_ms() -> u32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the millisecond counter is meant to wrap at 32 bits"
    )]
    let millis = Instant::now().as_millis() as u32;
    millis
}

fn publish_or_warn(sender: &StatusSender<'_>, update: StatusUpdate) {
    if !status::publish(sender, update) {
        warn!("status queue full, dropping {}", update);
    }
}

// ============================================================================
// Tasks
// ============================================================================

#[embassy_executor::task]
async fn button_task(
    mut button_a: Input<'static>,
    mut button_b: Input<'static>,
    mut dispatcher: InputDispatcher<Output<'static>>,
    status: StatusSender<'static>,
) -> ! {
    loop {
        let button = match select(
            button_a.wait_for_falling_edge(),
            button_b.wait_for_falling_edge(),
        )
        .await
        {
            Either::First(()) => ButtonId::A,
            Either::Second(()) => ButtonId::B,
        };

        match dispatcher.on_falling_edge(button, now_ms()) {
            Ok(EdgeOutcome::Applied(event)) => publish_or_warn(&status, StatusUpdate::Button(event)),
            Ok(EdgeOutcome::Rejected) => {}
            Err(err) => warn!("button {}: {}", button, err),
        }
    }
}

#[embassy_executor::task]
async fn status_task(
    mut oled: Oled,
    mut serial_tx: SerialTx,
    status: StatusReceiver<'static>,
) -> ! {
    loop {
        let update = status.receive().await;

        match update.log_line() {
            Ok(line) => {
                info!("{}", line.as_str());
                if let Err(err) = serial_tx.write_line(&line).await {
                    warn!("serial echo: {}", err);
                }
            }
            Err(err) => warn!("log line: {}", err),
        }

        match with_timeout(DISPLAY_TIMEOUT, render_status(&mut oled, &update)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!("display: {}", err),
            Err(_) => warn!("display: {}, dropped {}", Error::DisplayTimeout, update),
        }
    }
}

// ============================================================================
// Entry
// ============================================================================

/// Bring up the board and run the serial main loop forever.
///
/// Pin map:
///
/// | Function        | Pin            |
/// |-----------------|----------------|
/// | Button A / B    | GPIO6 / GPIO5 (pull-up, active low) |
/// | LED green / blue / red | GPIO12 / GPIO11 / GPIO13 |
/// | WS2812 data     | GPIO7 (PIO0 SM0) |
/// | OLED SDA / SCL  | GPIO14 / GPIO15 (I2C1) |
/// | UART0 TX / RX   | GPIO0 / GPIO1  |
///
/// # Errors
///
/// Returns an error only during start-up: a display that does not initialize
/// or a task that cannot be spawned.
pub async fn run(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    Timer::after(STARTUP_DELAY).await;
    info!("{}", status::STARTUP_MESSAGE);

    let green_led = Output::new(p.PIN_12, Level::Low);
    let blue_led = Output::new(p.PIN_11, Level::Low);
    // Unused, held low.
    let _red_led = Output::new(p.PIN_13, Level::Low);

    let button_a = Input::new(p.PIN_6, Pull::Up);
    let button_b = Input::new(p.PIN_5, Pull::Up);

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = BAUD_RATE;
    let tx_buffer = UART_TX_BUFFER.init([0; UART_BUFFER_SIZE]);
    let rx_buffer = UART_RX_BUFFER.init([0; UART_BUFFER_SIZE]);
    let (uart_tx, uart_rx) = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config)
        .into_buffered(Irqs, tx_buffer, rx_buffer)
        .split();

    let oled = Oled::new(p.I2C1, p.PIN_15, p.PIN_14, Irqs).await?;

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let mut console = Console::new(PioWs2812Transport::new(&mut common, sm0, p.PIN_7));

    let token = status_task(oled, SerialTx::new(uart_tx), STATUS_CHANNEL.receiver());
    spawner.spawn(token).map_err(Error::TaskSpawn)?;

    let sender = STATUS_CHANNEL.sender();
    let dispatcher = InputDispatcher::new(green_led, blue_led);
    let token = button_task(button_a, button_b, dispatcher, sender);
    spawner.spawn(token).map_err(Error::TaskSpawn)?;

    publish_or_warn(&sender, StatusUpdate::Ready);
    console.blank().await;
    info!("digit panel ready");

    let mut serial_rx = SerialRx::new(uart_rx);
    loop {
        match console.poll_once(&mut serial_rx).await {
            Ok(step) => {
                if let Some(update) = step.status_update() {
                    publish_or_warn(&sender, update);
                }
            }
            Err(err) => warn!("serial: {}", err),
        }
        Timer::after(IDLE_DELAY).await;
    }
}
