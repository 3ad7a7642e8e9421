//! In-memory pixel buffer for a small WS2812 matrix and its flush to the strip.
//!
//! See [`PixelMatrix`] for the buffer operations and [`StripTransport`] for the
//! wire side.
//!
//! # Example: Show a Digit
//!
//! ```rust,no_run
//! # use digit_panel::pixel_matrix::StripTransport;
//! use digit_panel::{glyph, pixel_matrix::PixelMatrix};
//!
//! async fn show_seven<T: StripTransport>(transport: T) {
//!     let mut matrix: PixelMatrix<T, 5, 5> = PixelMatrix::new(transport);
//!     matrix.load(&glyph::lookup('7'));
//!     matrix.flush().await; // nothing changes on the LEDs until this returns
//! }
//! ```

use core::ops::{Deref, DerefMut};

use smart_leds::RGB8;

// ============================================================================
// Frame2d - Row-major pixel buffer
// ============================================================================

/// Fixed-size 2D pixel buffer, stored row-major.
///
/// `frame[y][x]` is the pixel at column `x`, row `y`, so the flattened position of
/// `(x, y)` is `y * W + x`, which is also the order pixels leave on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Frame width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels (WIDTH × HEIGHT).
    pub const LEN: usize = W * H;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Color at `(x, y)`, or `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<RGB8> {
        self.0.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Pixels in wire order: row by row, left to right within a row.
    pub fn pixels(&self) -> impl Iterator<Item = RGB8> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }
}

impl<const W: usize, const H: usize> Deref for Frame2d<W, H> {
    type Target = [[RGB8; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for Frame2d<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Wire format
// ============================================================================

/// Pack a color into the 32-bit word the WS2812 state machine shifts out.
///
/// The 24-bit `0xRRGGBB` value is shifted into the top three bytes unchanged;
/// the low byte is padding. The state machine shifts left and pulls 24 bits
/// per LED, so the top byte leaves first.
///
/// ```rust
/// use digit_panel::pixel_matrix::wire_word;
/// use smart_leds::RGB8;
///
/// assert_eq!(wire_word(RGB8::new(0x11, 0x22, 0x33)), 0x1122_3300);
/// ```
#[must_use]
pub const fn wire_word(color: RGB8) -> u32 {
    let rgb = ((color.r as u32) << 16) | ((color.g as u32) << 8) | (color.b as u32);
    rgb << 8
}

/// Transmit side of an addressable-LED strip.
///
/// `put_word` hands one cell to the strip and returns once the transport has
/// accepted it. `latch` ends a frame; implementors that need a reset gap wait it
/// out there.
pub trait StripTransport {
    /// Send one cell, already packed by [`wire_word`].
    async fn put_word(&mut self, word: u32);

    /// Mark the end of a frame.
    async fn latch(&mut self) {}
}

// ============================================================================
// PixelMatrix
// ============================================================================

/// A `W`×`H` LED matrix: its buffer plus the transport that feeds the strip.
///
/// The buffer is only sent by [`flush`](Self::flush); the matrix never refreshes
/// itself. The strip must be wired as one chain that visits the cells in buffer
/// order (row by row).
pub struct PixelMatrix<T, const W: usize, const H: usize> {
    frame: Frame2d<W, H>,
    transport: T,
}

impl<T: StripTransport, const W: usize, const H: usize> PixelMatrix<T, W, H> {
    /// Create a matrix with an all-black buffer. Nothing is sent yet.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            frame: Frame2d::new(),
            transport,
        }
    }

    /// Set every cell to black.
    pub fn clear(&mut self) {
        self.frame = Frame2d::new();
    }

    /// Write `color` at `(x, y)`.
    ///
    /// Coordinates outside `0..W` × `0..H` are ignored, so a glyph with an
    /// off-by-one cell draws everything else and drops that one.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: RGB8) {
        let (Ok(x_index), Ok(y_index)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(pixel) = self
            .frame
            .get_mut(y_index)
            .and_then(|row| row.get_mut(x_index))
        {
            *pixel = color;
        }
    }

    /// Replace the buffer with `glyph`: clear, then draw each of its cells.
    pub fn load(&mut self, glyph: &crate::glyph::Glyph) {
        self.clear();
        for cell in glyph.cells() {
            self.set_pixel(i32::from(cell.x), i32::from(cell.y), cell.color);
        }
    }

    /// Send the whole buffer to the strip, one cell at a time in row-major order.
    ///
    /// Returns after the last cell has been accepted and the frame latched.
    pub async fn flush(&mut self) {
        for color in self.frame.pixels() {
            self.transport.put_word(wire_word(color)).await;
        }
        self.transport.latch().await;
    }

    /// The current buffer contents.
    #[must_use]
    pub const fn frame(&self) -> &Frame2d<W, H> {
        &self.frame
    }

    /// Borrow the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Give back the transport.
    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }
}
