/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign},
};

use super::Square;

/// A set of [`Square`]s, stored as one bit per square.
///
/// Bit `n` corresponds to the square with index `n` (a1 is bit 0, h8 is bit 63).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY_BOARD: Self = Self(0);
    pub const FULL_BOARD: Self = Self(u64::MAX);

    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Creates a [`Bitboard`] containing only `square`.
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        square.bitboard()
    }

    /// The underlying bits.
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Number of squares in this set.
    #[inline(always)]
    pub const fn population(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & square.bitboard().0 != 0
    }

    /// Returns `true` if `self` and `other` share at least one square.
    #[inline(always)]
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub fn set(&mut self, square: Square) {
        self.0 |= square.bitboard().0;
    }

    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.0 &= !square.bitboard().0;
    }

    /// The lowest square in this set, if any.
    #[inline(always)]
    pub const fn lsb(&self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as usize)
        }
    }

    /// Removes and returns the lowest square in this set, if any.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let square = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    /// Iterates over the squares of this set, lowest index first.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bits: *self }
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(value: Square) -> Self {
        value.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY_BOARD, |bb, square| bb | square)
    }
}

impl<const N: usize> From<[Square; N]> for Bitboard {
    fn from(value: [Square; N]) -> Self {
        value.into_iter().collect()
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the squares of a [`Bitboard`].
pub struct BitboardIter {
    bits: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bits.pop_lsb()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

macro_rules! impl_bitwise_op {
    ($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl<T: Into<Bitboard>> $trait<T> for Bitboard {
            type Output = Self;
            #[inline(always)]
            fn $fn(self, rhs: T) -> Self::Output {
                Self(self.0 $op rhs.into().0)
            }
        }

        impl<T: Into<Bitboard>> $assign_trait<T> for Bitboard {
            #[inline(always)]
            fn $assign_fn(&mut self, rhs: T) {
                self.0 = self.0 $op rhs.into().0;
            }
        }
    };
}

impl_bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl<T: Into<Bitboard>> Sub<T> for Bitboard {
    type Output = Self;
    /// Set difference: the squares of `self` that are not in `rhs`.
    #[inline(always)]
    fn sub(self, rhs: T) -> Self::Output {
        Self(self.0 & !rhs.into().0)
    }
}

impl<T: Into<Bitboard>> SubAssign<T> for Bitboard {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: T) {
        self.0 &= !rhs.into().0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl fmt::Display for Bitboard {
    /// Draws the set as an 8x8 grid, eighth rank on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let Some(square) = Square::new(file, rank) else {
                    continue;
                };
                let c = if self.contains(square) { 'X' } else { '.' };
                if file == 7 {
                    write!(f, "{c}")?;
                } else {
                    write!(f, "{c} ")?;
                }
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
