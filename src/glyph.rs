//! Fixed digit glyphs for the 5×5 matrix.
//!
//! The patterns are hand-drawn approximations of each digit, one color per
//! digit. They are stored as plain data in [`DIGIT_GLYPHS`]; [`lookup`] is the
//! only way the rest of the crate reaches them.

use smart_leds::{RGB8, colors};

const GREEN: RGB8 = RGB8::new(0, 0xFF, 0);
const BLUE: RGB8 = RGB8::new(0, 0, 0xFF);
const RED: RGB8 = RGB8::new(0xFF, 0, 0);

/// Width and height of the glyph grid.
pub const GLYPH_SIZE: usize = 5;

/// One lit cell of a glyph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GlyphCell {
    /// Column, `0` is the left edge.
    pub x: u8,
    /// Row, `0` is the first row the strip is wired through.
    pub y: u8,
    /// Cell color.
    pub color: RGB8,
}

/// An immutable set of lit cells drawn in a single color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph {
    color: RGB8,
    cells: &'static [(u8, u8)],
}

impl Glyph {
    /// The glyph with no lit cells, shown for any unsupported symbol.
    pub const BLANK: Self = Self::new(colors::BLACK, &[]);

    const fn new(color: RGB8, cells: &'static [(u8, u8)]) -> Self {
        Self { color, cells }
    }

    /// The color every cell of this glyph is drawn in.
    #[must_use]
    pub const fn color(&self) -> RGB8 {
        self.color
    }

    /// Number of lit cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` for [`Glyph::BLANK`] (no lit cells).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over the lit cells with their color.
    pub fn cells(&self) -> impl Iterator<Item = GlyphCell> + '_ {
        self.cells.iter().map(|&(x, y)| GlyphCell {
            x,
            y,
            color: self.color,
        })
    }
}

/// Look up the glyph for `symbol`.
///
/// `'0'..='9'` return their digit pattern; every other symbol returns
/// [`Glyph::BLANK`]. A blank result is a normal answer, not an error.
///
/// ```rust
/// use digit_panel::glyph::{Glyph, lookup};
///
/// assert_eq!(lookup('0').len(), 16);
/// assert_eq!(lookup('x'), Glyph::BLANK);
/// ```
#[must_use]
pub fn lookup(symbol: char) -> Glyph {
    symbol
        .to_digit(10)
        .and_then(|digit| DIGIT_GLYPHS.get(usize::try_from(digit).ok()?))
        .copied()
        .unwrap_or(Glyph::BLANK)
}

/// Border of the grid.
#[rustfmt::skip]
const ZERO: &[(u8, u8)] = &[
    (0, 0), (1, 0), (2, 0), (3, 0), (4, 0),
    (0, 1), (4, 1),
    (0, 2), (4, 2),
    (0, 3), (4, 3),
    (0, 4), (1, 4), (2, 4), (3, 4), (4, 4),
];

#[rustfmt::skip]
const ONE: &[(u8, u8)] = &[
    (2, 0), (2, 1), (2, 2), (2, 3), (2, 4),
    (3, 0), (1, 0), (1, 3),
];

#[rustfmt::skip]
const TWO: &[(u8, u8)] = &[
    (3, 4), (2, 4), (1, 4),
    (3, 3),
    (1, 2), (2, 2), (3, 2),
    (1, 1),
    (3, 0), (2, 0), (1, 0),
];

#[rustfmt::skip]
const THREE: &[(u8, u8)] = &[
    (1, 4), (3, 3), (1, 2), (3, 1), (1, 0),
    (3, 4), (2, 4), (3, 2), (2, 2), (3, 0), (2, 0),
];

#[rustfmt::skip]
const FOUR: &[(u8, u8)] = &[
    (3, 4), (1, 4),
    (1, 3), (3, 3),
    (3, 2), (2, 2), (1, 2),
    (3, 1),
    (1, 0),
];

#[rustfmt::skip]
const FIVE: &[(u8, u8)] = &[
    (3, 4), (2, 4), (1, 4),
    (1, 3),
    (3, 2), (2, 2), (1, 2),
    (3, 1),
    (3, 0), (2, 0), (1, 0),
];

#[rustfmt::skip]
const SIX: &[(u8, u8)] = &[
    (3, 4), (2, 4), (1, 4),
    (1, 3),
    (3, 2), (2, 2), (1, 2),
    (1, 1), (3, 1),
    (3, 0), (2, 0), (1, 0),
];

#[rustfmt::skip]
const SEVEN: &[(u8, u8)] = &[
    (3, 4), (2, 4), (1, 4),
    (3, 3),
    (1, 2),
    (3, 1),
    (1, 0),
];

#[rustfmt::skip]
const EIGHT: &[(u8, u8)] = &[
    (3, 4), (2, 4), (1, 4),
    (1, 3), (3, 3),
    (3, 2), (2, 2), (1, 2),
    (1, 1), (3, 1),
    (3, 0), (2, 0), (1, 0),
];

#[rustfmt::skip]
const NINE: &[(u8, u8)] = &[
    (3, 4), (2, 4), (1, 4),
    (1, 3), (3, 3),
    (3, 2), (2, 2), (1, 2),
    (3, 1),
    (1, 0),
];

/// Digit glyphs indexed by digit value.
pub static DIGIT_GLYPHS: [Glyph; 10] = [
    Glyph::new(GREEN, ZERO),
    Glyph::new(BLUE, ONE),
    Glyph::new(RED, TWO),
    Glyph::new(GREEN, THREE),
    Glyph::new(BLUE, FOUR),
    Glyph::new(RED, FIVE),
    Glyph::new(GREEN, SIX),
    Glyph::new(BLUE, SEVEN),
    Glyph::new(RED, EIGHT),
    Glyph::new(GREEN, NINE),
];
