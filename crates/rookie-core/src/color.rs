//! Side colors.

use std::fmt;
use std::ops::Not;

/// One of the two sides: White moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// All colors in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// `+1` for White, `-1` for Black.
    ///
    /// Multiplying a White-relative score by this sign makes it relative to `self`.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Single-character side marker used in position keys.
    #[inline]
    pub const fn marker(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

impl From<shakmaty::Color> for Color {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn flip_and_not_agree() {
        for color in Color::ALL {
            assert_eq!(!color, color.flip());
            assert_eq!(color.flip().flip(), color);
        }
    }

    #[test]
    fn sign_is_antisymmetric() {
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -Color::White.sign());
    }

    #[test]
    fn markers() {
        assert_eq!(Color::White.marker(), 'w');
        assert_eq!(Color::Black.marker(), 'b');
    }

    #[test]
    fn from_shakmaty() {
        assert_eq!(Color::from(shakmaty::Color::White), Color::White);
        assert_eq!(Color::from(shakmaty::Color::Black), Color::Black);
    }
}
