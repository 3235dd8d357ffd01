//! 3-bit ANSI colors and color mixing.
//!
//! Colors follow the classic ANSI encoding where bit 0 is red, bit 1 green
//! and bit 2 blue, so mixing two colors is plain bit arithmetic. `Default`
//! stands for the terminal's own foreground and sits outside the 3-bit space.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ANSI reset sequence emitted after painted text.
pub const ANSI_RESET: &str = "\x1b[0m";

/// A terminal foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// ANSI 0.
    Black,
    /// ANSI 1.
    Red,
    /// ANSI 2.
    Green,
    /// ANSI 3 (red + green).
    Yellow,
    /// ANSI 4.
    Blue,
    /// ANSI 5 (red + blue).
    Magenta,
    /// ANSI 6 (green + blue).
    Cyan,
    /// ANSI 7.
    White,
    /// Terminal default foreground, no escape codes.
    #[default]
    Default,
}

/// Name table, indexed by ANSI code, with `Default` last.
const NAMES: [(&str, Color); 9] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
    ("default", Color::Default),
];

impl Color {
    /// Colors handed out to series that do not name one, in order.
    pub const PALETTE: [Self; 6] =
        [Self::Green, Self::Red, Self::Blue, Self::Yellow, Self::Magenta, Self::Cyan];

    /// Returns the 3-bit ANSI code, or `None` for `Default`.
    #[must_use]
    pub const fn code(self) -> Option<u8> {
        match self {
            Self::Black => Some(0),
            Self::Red => Some(1),
            Self::Green => Some(2),
            Self::Yellow => Some(3),
            Self::Blue => Some(4),
            Self::Magenta => Some(5),
            Self::Cyan => Some(6),
            Self::White => Some(7),
            Self::Default => None,
        }
    }

    /// Creates a color from a 3-bit code. Higher bits are ignored.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        NAMES[(code & 0b111) as usize].1
    }

    /// Returns the palette color for series number `index`, cycling.
    #[must_use]
    pub const fn nth(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// Lowercase name of the color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.code() {
            Some(code) => NAMES[code as usize].0,
            None => NAMES[8].0,
        }
    }

    /// Light-style mix: component-wise OR, moving towards white.
    #[must_use]
    pub fn additive_mix(self, other: Self) -> Self {
        match (self.code(), other.code()) {
            (Some(a), Some(b)) => Self::from_code(a | b),
            (None, _) => other,
            (_, None) => self,
        }
    }

    /// Pigment-style mix: component-wise AND, moving towards black.
    #[must_use]
    pub fn subtractive_mix(self, other: Self) -> Self {
        match (self.code(), other.code()) {
            (Some(a), Some(b)) => Self::from_code(a & b),
            (None, _) => other,
            (_, None) => self,
        }
    }

    /// Color of a cell hit by two series.
    ///
    /// Uses the additive mix, except when the mix would look exactly like one
    /// of the inputs (e.g. red over yellow). Then the codes are summed modulo 8
    /// so the overlap still stands out.
    ///
    /// Black has no components to add, so both rules return the other color
    /// unchanged and a crossing with a black series is not highlighted.
    #[must_use]
    pub fn overlap(self, other: Self) -> Self {
        if self == other {
            return self;
        }
        let (Some(a), Some(b)) = (self.code(), other.code()) else {
            return self.additive_mix(other);
        };

        let mixed = Self::from_code(a | b);
        if mixed == self || mixed == other {
            Self::from_code(a.wrapping_add(b))
        } else {
            mixed
        }
    }

    /// Returns the SGR sequence that switches to this foreground color.
    #[must_use]
    pub fn ansi_prefix(self) -> Option<String> {
        self.code().map(|code| format!("\x1b[3{code}m"))
    }

    /// Wraps `text` in this color's escape sequences.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        match self.ansi_prefix() {
            Some(prefix) => format!("{prefix}{text}{ANSI_RESET}"),
            None => text.to_string(),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|&(_, color)| color)
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
