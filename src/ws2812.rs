//! WS2812 transport on an RP2040 PIO state machine.
//!
//! See [`PioWs2812Transport`].

use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_time::Timer;
use fixed::types::U24F8;

use crate::pixel_matrix::StripTransport;

/// WS2812 bit rate in kHz.
const BIT_RATE_KHZ: u32 = 800;

/// State machine cycles spent on each bit (T1 + T2 + T3 below).
const CYCLES_PER_BIT: u32 = 10;

/// Bits per LED; the state machine autopulls after this many.
const BITS_PER_LED: u8 = 24;

/// Low time after the last bit that makes the strip latch the frame.
const LATCH_MICROS: u64 = 60;

/// Time to shift out a full joined TX FIFO (8 LEDs at 30 µs each).
const FIFO_DRAIN_MICROS: u64 = 240;

/// Drives a WS2812 chain from one PIO state machine.
///
/// Each word pushed into the TX FIFO carries one LED, packed by
/// [`wire_word`](crate::pixel_matrix::wire_word). The state machine shifts out
/// the top 24 bits MSB first at 800 kHz; a push waits while the FIFO is full.
pub struct PioWs2812Transport<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioWs2812Transport<'d, PIO, SM> {
    /// Load the WS2812 program, bind `data_pin` as its side-set output, and start `sm`.
    pub fn new<DATA: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        data_pin: Peri<'d, DATA>,
    ) -> Self {
        // T1 = 2, T2 = 5, T3 = 3 cycles. A one bit is high for T1 + T2, a zero for T1.
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "bitloop:",
            "    out x, 1        side 0 [2]",
            "    jmp !x do_zero  side 1 [1]",
            "do_one:",
            "    jmp bitloop     side 1 [4]",
            "do_zero:",
            "    nop             side 0 [4]",
            ".wrap"
        );
        let installed = common.load_program(&prg.program);
        let data_pio_pin = common.make_pio_pin(data_pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&data_pio_pin]);
        cfg.clock_divider = clock_divider(clk_sys_freq());
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_LED,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&data_pio_pin]);
        sm.set_enable(true);

        Self { sm }
    }
}

/// Divider from `clk_sys_hz` to `BIT_RATE_KHZ * CYCLES_PER_BIT`.
///
/// 125 MHz gives 15.625. Falls back to 1 if the ratio cannot be represented.
fn clock_divider(clk_sys_hz: u32) -> U24F8 {
    let cycle_rate_khz = U24F8::from_num(BIT_RATE_KHZ * CYCLES_PER_BIT);
    U24F8::checked_from_num(clk_sys_hz / 1_000)
        .and_then(|clk_khz| clk_khz.checked_div(cycle_rate_khz))
        .unwrap_or(U24F8::ONE)
}

impl<PIO: Instance, const SM: usize> StripTransport for PioWs2812Transport<'_, PIO, SM> {
    async fn put_word(&mut self, word: u32) {
        self.sm.tx().wait_push(word).await;
    }

    async fn latch(&mut self) {
        // The last pushes may still be queued when wait_push returns.
        Timer::after_micros(FIFO_DRAIN_MICROS.saturating_add(LATCH_MICROS)).await;
    }
}
