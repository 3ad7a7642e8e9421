//! SSD1306 128×64 status display over async I2C.
//!
//! See [`Oled`].

use embassy_rp::Peri;
use embassy_rp::i2c::{self, Async, I2c, SclPin, SdaPin};
use embassy_rp::interrupt::typelevel::{Binding, I2C1_IRQ};
use embassy_rp::peripherals::I2C1;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Point};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use ssd1306::mode::{BufferedGraphicsModeAsync, DisplayConfigAsync};
use ssd1306::prelude::{DisplayRotation, DisplaySize128x64, I2CInterface};
use ssd1306::{I2CDisplayInterface, Ssd1306Async};

use crate::status::TextDisplay;
use crate::{Error, Result};

/// I2C clock for the display.
pub const OLED_I2C_FREQUENCY_HZ: u32 = 400_000;

/// 7-bit address of the display.
pub const OLED_ADDRESS: u8 = 0x3C;

type Driver = Ssd1306Async<
    I2CInterface<I2c<'static, I2C1, Async>>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

/// The status display: a buffered SSD1306 in 128×64 mode.
///
/// Text is drawn in the 6×10 font with the top of each line at the given `y`.
pub struct Oled {
    driver: Driver,
}

impl Oled {
    /// Bring up I2C1 at [`OLED_I2C_FREQUENCY_HZ`] and initialize the panel.
    ///
    /// The buffer starts blank; nothing is shown until the first commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the panel does not acknowledge its init sequence.
    pub async fn new(
        i2c1: Peri<'static, I2C1>,
        scl: Peri<'static, impl SclPin<I2C1>>,
        sda: Peri<'static, impl SdaPin<I2C1>>,
        irqs: impl Binding<I2C1_IRQ, i2c::InterruptHandler<I2C1>>,
    ) -> Result<Self> {
        let mut config = i2c::Config::default();
        config.frequency = OLED_I2C_FREQUENCY_HZ;
        let bus = I2c::new_async(i2c1, scl, sda, irqs, config);

        let interface = I2CDisplayInterface::new_custom_address(bus, OLED_ADDRESS);
        let mut driver = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        driver.init().await.map_err(|_| Error::Display)?;
        Ok(Self { driver })
    }
}

impl TextDisplay for Oled {
    fn clear(&mut self, invert: bool) -> Result<()> {
        let color = if invert { BinaryColor::On } else { BinaryColor::Off };
        self.driver.clear(color).map_err(|_| Error::Display)
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) -> Result<()> {
        Text::with_baseline(text, Point::new(x, y), TEXT_STYLE, Baseline::Top)
            .draw(&mut self.driver)
            .map_err(|_| Error::Display)?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.driver.flush().await.map_err(|_| Error::Display)
    }
}
