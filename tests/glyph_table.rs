#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the digit glyph table.

use std::collections::BTreeSet;

use digit_panel::glyph::{DIGIT_GLYPHS, GLYPH_SIZE, Glyph, lookup};
use smart_leds::RGB8;

const GREEN: RGB8 = RGB8::new(0, 0xFF, 0);
const BLUE: RGB8 = RGB8::new(0, 0, 0xFF);
const RED: RGB8 = RGB8::new(0xFF, 0, 0);

#[test]
fn zero_is_a_green_border() {
    let glyph = lookup('0');
    assert_eq!(glyph.color(), GREEN);
    assert_eq!(glyph.len(), 16);
    for cell in glyph.cells() {
        let on_edge = cell.x == 0 || cell.x == 4 || cell.y == 0 || cell.y == 4;
        assert!(on_edge, "({}, {}) is not on the border", cell.x, cell.y);
        assert_eq!(cell.color, GREEN);
    }
}

#[test]
fn digit_colors_cycle_green_blue_red() {
    let expected = [
        GREEN, BLUE, RED, GREEN, BLUE, RED, GREEN, BLUE, RED, GREEN,
    ];
    for (symbol, color) in ('0'..='9').zip(expected) {
        assert_eq!(lookup(symbol).color(), color, "digit {symbol}");
    }
}

#[test]
fn every_digit_has_cells_inside_the_grid() {
    for glyph in &DIGIT_GLYPHS {
        assert!(!glyph.is_empty());
        for cell in glyph.cells() {
            assert!(usize::from(cell.x) < GLYPH_SIZE);
            assert!(usize::from(cell.y) < GLYPH_SIZE);
        }
    }
}

#[test]
fn one_has_its_vertical_stroke() {
    let glyph = lookup('1');
    for y in 0..5 {
        assert!(glyph.cells().any(|cell| cell.x == 2 && cell.y == y));
    }
}

#[test]
fn unsupported_symbols_are_blank() {
    for symbol in ['x', 'A', ' ', '\n', '\u{e9}'] {
        let glyph = lookup(symbol);
        assert_eq!(glyph, Glyph::BLANK);
        assert!(glyph.is_empty());
        assert_eq!(glyph.cells().count(), 0);
    }
}

#[test]
fn lookup_matches_table_order() {
    for (digit, glyph) in DIGIT_GLYPHS.iter().enumerate() {
        let symbol = char::from_digit(u32::try_from(digit).unwrap(), 10).unwrap();
        assert_eq!(&lookup(symbol), glyph);
    }
}

fn cell_set(symbol: char) -> BTreeSet<(u8, u8)> {
    lookup(symbol).cells().map(|cell| (cell.x, cell.y)).collect()
}

#[rustfmt::skip]
const EXPECTED_CELLS: [(char, &[(u8, u8)]); 9] = [
    ('1', &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (3, 0), (1, 0), (1, 3)]),
    ('2', &[(3, 4), (2, 4), (1, 4), (3, 3), (1, 2), (2, 2), (3, 2), (1, 1), (3, 0), (2, 0), (1, 0)]),
    ('3', &[(1, 4), (3, 3), (1, 2), (3, 1), (1, 0), (3, 4), (2, 4), (3, 2), (2, 2), (3, 0), (2, 0)]),
    ('4', &[(3, 4), (1, 4), (1, 3), (3, 3), (3, 2), (2, 2), (1, 2), (3, 1), (1, 0)]),
    ('5', &[(3, 4), (2, 4), (1, 4), (1, 3), (3, 2), (2, 2), (1, 2), (3, 1), (3, 0), (2, 0), (1, 0)]),
    ('6', &[(3, 4), (2, 4), (1, 4), (1, 3), (3, 2), (2, 2), (1, 2), (1, 1), (3, 1), (3, 0), (2, 0), (1, 0)]),
    ('7', &[(3, 4), (2, 4), (1, 4), (3, 3), (1, 2), (3, 1), (1, 0)]),
    ('8', &[(3, 4), (2, 4), (1, 4), (1, 3), (3, 3), (3, 2), (2, 2), (1, 2), (1, 1), (3, 1), (3, 0), (2, 0), (1, 0)]),
    ('9', &[(3, 4), (2, 4), (1, 4), (1, 3), (3, 3), (3, 2), (2, 2), (1, 2), (3, 1), (1, 0)]),
];

#[test]
fn every_digit_lights_exactly_its_pattern() {
    let border: BTreeSet<(u8, u8)> = (0..5_u8)
        .flat_map(|y| (0..5_u8).map(move |x| (x, y)))
        .filter(|&(x, y)| x == 0 || x == 4 || y == 0 || y == 4)
        .collect();
    assert_eq!(cell_set('0'), border);

    for (symbol, cells) in EXPECTED_CELLS {
        let expected: BTreeSet<(u8, u8)> = cells.iter().copied().collect();
        assert_eq!(cell_set(symbol), expected, "digit {symbol}");
        assert_eq!(lookup(symbol).len(), cells.len(), "digit {symbol} has duplicate cells");
    }
}

#[test]
fn digit_patterns_are_pairwise_distinct() {
    let patterns: Vec<(char, BTreeSet<(u8, u8)>)> =
        ('0'..='9').map(|symbol| (symbol, cell_set(symbol))).collect();
    for (index, (left_symbol, left)) in patterns.iter().enumerate() {
        for (right_symbol, right) in patterns.iter().skip(index + 1) {
            assert_ne!(left, right, "digits {left_symbol} and {right_symbol} look the same");
        }
    }
}
