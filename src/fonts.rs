//! Standard PDF Type1 fonts used by the document builder.
//!
//! Only Helvetica and Helvetica-Bold are needed. Both are part of the base
//! fourteen fonts every PDF reader ships, so nothing is embedded and text is
//! measured with the published character widths below.

use strum_macros::{Display, EnumIter};

#[derive(Display, EnumIter, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Style {
    #[strum(serialize = "Helvetica")]
    Regular,
    #[strum(serialize = "Helvetica-Bold")]
    Bold,
}

/// Widths of printable ASCII (0x20..=0x7E) in thousandths of an em.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// Latin-1 letters outside ASCII are measured like a digit.
const FALLBACK_WIDTH: u16 = 556;

impl Style {
    /// Name of the font in the page resource dictionary.
    pub fn resource(&self) -> &'static str {
        match self {
            Style::Regular => "F1",
            Style::Bold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Style::Regular => &HELVETICA,
            Style::Bold => &HELVETICA_BOLD,
        }
    }

    pub fn char_width(&self, c: char) -> u16 {
        match c {
            ' '..='~' => self.widths()[c as usize - 0x20],
            _ => FALLBACK_WIDTH,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Font {
    pub style: Style,
    /// Size in points
    pub size: f32,
}

impl Font {
    pub fn new(style: Style, size: f32) -> Self {
        Self { style, size }
    }

    /// Width of `text` in points.
    pub fn text_width(&self, text: &str) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.style.char_width(c)))
            .sum();
        units as f32 * self.size / 1000.0
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(Style::Regular, 12.0)
    }
}

/// Encode text for a WinAnsiEncoding font. Characters that have no single
/// byte representation become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            _ => b'?',
        })
        .collect()
}
