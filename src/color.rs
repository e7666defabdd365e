//! Pixel colors of a black/white image.
//!
//! ## Bit Convention
//! Following the PBM format, a set bit is BLACK and a clear bit is WHITE:
//! - `Color::White` = 0
//! - `Color::Black` = 1

use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A single pixel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    /// Background pixel (bit 0).
    #[default]
    White = 0,
    /// Foreground pixel (bit 1).
    Black = 1,
}

impl Color {
    /// Map a raw pixel byte to a color. Any non-zero value is BLACK.
    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Self::White
        } else {
            Self::Black
        }
    }

    /// Raw pixel value (0 or 1).
    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl BitAnd for Color {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self::from_bit(self.bit() & rhs.bit())
    }
}

impl BitOr for Color {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self::from_bit(self.bit() | rhs.bit())
    }
}

impl BitXor for Color {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self::from_bit(self.bit() ^ rhs.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::{Black, White};

    #[test]
    fn test_from_bit() {
        assert_eq!(Color::from_bit(0), White);
        assert_eq!(Color::from_bit(1), Black);
        assert_eq!(Color::from_bit(0xFF), Black);
    }

    #[test]
    fn test_truth_tables() {
        assert_eq!(!White, Black);
        assert_eq!(!Black, White);

        assert_eq!(Black & Black, Black);
        assert_eq!(Black & White, White);
        assert_eq!(White & White, White);

        assert_eq!(Black | White, Black);
        assert_eq!(White | White, White);

        assert_eq!(Black ^ White, Black);
        assert_eq!(Black ^ Black, White);
    }
}
