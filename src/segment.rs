//! Directional line segments and their box-drawing glyphs.
//!
//! A cell of the chart draws up to four half-edges leaving its center:
//! left, up, right and down. The set is stored as a 4-bit flag value and
//! mapped to a box-drawing character at render time.

use std::fmt;

/// A set of half-edges drawn in one chart cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Segment(u8);

impl Segment {
    /// No segments.
    pub const EMPTY: Self = Self(0);
    /// Half-edge towards the previous column.
    pub const LEFT: Self = Self(1);
    /// Half-edge towards the row above.
    pub const UP: Self = Self(2);
    /// Half-edge towards the next column.
    pub const RIGHT: Self = Self(4);
    /// Half-edge towards the row below.
    pub const DOWN: Self = Self(8);

    /// Vertical bar with a tee pointing left, used for the Y axis.
    pub const AXIS: Self = Self(Self::LEFT.0 | Self::UP.0 | Self::DOWN.0);

    const MASK: u8 = 0b1111;

    /// Creates a segment set from raw bits. Bits above the low four are ignored.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Returns the raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no segment is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two segment sets. Commutative and idempotent.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the box-drawing glyph for this set.
    ///
    /// Returns `None` for a lone UP, RIGHT or DOWN half-edge: the rasterizer
    /// never produces those, so hitting one is a bug upstream.
    #[must_use]
    pub const fn glyph(self) -> Option<&'static str> {
        GLYPHS[self.0 as usize]
    }
}

/// Glyph table indexed by flag bits (LEFT=1, UP=2, RIGHT=4, DOWN=8).
const GLYPHS: [Option<&str>; 16] = [
    Some(" "), // empty
    Some("╴"), // L (gap)
    None,      // U
    Some("╯"), // L U
    None,      // R
    Some("─"), // L R
    Some("╰"), // U R
    Some("┴"), // L U R
    None,      // D
    Some("╮"), // L D
    Some("│"), // U D
    Some("┤"), // L U D
    Some("╭"), // R D
    Some("┬"), // L R D
    Some("├"), // U R D
    Some("┼"), // L U R D
];

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph().unwrap_or("?"))
    }
}
