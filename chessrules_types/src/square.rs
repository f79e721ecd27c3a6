/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{Bitboard, Team};

/// A single square on an 8x8 chessboard.
///
/// Internally this is `rank * 8 + file`, where file `0` is the a-file and rank `0` is the first rank.
///
/// Two coordinate systems meet at this type:
/// * the algebraic view, `('e', 4)` or `"e4"`, with 1-based ranks, and
/// * the raw array view, `(column, row)`, where row `0` is the *eighth* rank and row `7` is the first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    pub const A1: Self = Self(0);
    pub const B1: Self = Self(1);
    pub const C1: Self = Self(2);
    pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);
    pub const F1: Self = Self(5);
    pub const G1: Self = Self(6);
    pub const H1: Self = Self(7);
    pub const A2: Self = Self(8);
    pub const B2: Self = Self(9);
    pub const C2: Self = Self(10);
    pub const D2: Self = Self(11);
    pub const E2: Self = Self(12);
    pub const F2: Self = Self(13);
    pub const G2: Self = Self(14);
    pub const H2: Self = Self(15);
    pub const A3: Self = Self(16);
    pub const B3: Self = Self(17);
    pub const C3: Self = Self(18);
    pub const D3: Self = Self(19);
    pub const E3: Self = Self(20);
    pub const F3: Self = Self(21);
    pub const G3: Self = Self(22);
    pub const H3: Self = Self(23);
    pub const A4: Self = Self(24);
    pub const B4: Self = Self(25);
    pub const C4: Self = Self(26);
    pub const D4: Self = Self(27);
    pub const E4: Self = Self(28);
    pub const F4: Self = Self(29);
    pub const G4: Self = Self(30);
    pub const H4: Self = Self(31);
    pub const A5: Self = Self(32);
    pub const B5: Self = Self(33);
    pub const C5: Self = Self(34);
    pub const D5: Self = Self(35);
    pub const E5: Self = Self(36);
    pub const F5: Self = Self(37);
    pub const G5: Self = Self(38);
    pub const H5: Self = Self(39);
    pub const A6: Self = Self(40);
    pub const B6: Self = Self(41);
    pub const C6: Self = Self(42);
    pub const D6: Self = Self(43);
    pub const E6: Self = Self(44);
    pub const F6: Self = Self(45);
    pub const G6: Self = Self(46);
    pub const H6: Self = Self(47);
    pub const A7: Self = Self(48);
    pub const B7: Self = Self(49);
    pub const C7: Self = Self(50);
    pub const D7: Self = Self(51);
    pub const E7: Self = Self(52);
    pub const F7: Self = Self(53);
    pub const G7: Self = Self(54);
    pub const H7: Self = Self(55);
    pub const A8: Self = Self(56);
    pub const B8: Self = Self(57);
    pub const C8: Self = Self(58);
    pub const D8: Self = Self(59);
    pub const E8: Self = Self(60);
    pub const F8: Self = Self(61);
    pub const G8: Self = Self(62);
    pub const H8: Self = Self(63);

    /// Creates a [`Square`] from a 0-based file and rank, returning `None` if either is out of bounds.
    #[inline(always)]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    /// Creates a [`Square`] from an index in `0..64`.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Creates a [`Square`] from an algebraic file letter and a 1-based rank number.
    ///
    /// # Example
    /// ```
    /// # use chessrules_types::Square;
    /// assert_eq!(Square::from_chess('e', 4).unwrap(), Square::E4);
    /// assert!(Square::from_chess('i', 4).is_err());
    /// assert!(Square::from_chess('a', 9).is_err());
    /// ```
    pub fn from_chess(file: char, rank: u8) -> Result<Self> {
        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            bail!("Invalid file: Got {file:?}. Expected a letter between 'a' and 'h'.");
        }
        if !(1..=8).contains(&rank) {
            bail!("Invalid rank: Got {rank}. Expected a number between 1 and 8.");
        }
        Ok(Self((rank - 1) * 8 + (file as u8 - b'a')))
    }

    /// Creates a [`Square`] from raw array coordinates, where row `0` is the eighth rank.
    ///
    /// # Example
    /// ```
    /// # use chessrules_types::Square;
    /// assert_eq!(Square::from_raw(0, 7).unwrap(), Square::A1);
    /// assert_eq!(Square::from_raw(4, 0).unwrap(), Square::E8);
    /// ```
    pub fn from_raw(column: u8, row: u8) -> Result<Self> {
        if column >= 8 || row >= 8 {
            bail!("Invalid raw coordinate: Got ({column}, {row}). Both must be in 0..8.");
        }
        Ok(Self((7 - row) * 8 + column))
    }

    /// Parses a [`Square`] from a string like `"e4"`.
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut chars = uci.trim().chars();
        let file = chars
            .next()
            .ok_or(anyhow!("Invalid square: Got an empty string."))?;
        let rank: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| anyhow!("Invalid square: Got {uci:?}. Expected something like \"e4\"."))?;
        Self::from_chess(file, rank)
    }

    /// This square in algebraic coordinates: a file letter and a 1-based rank.
    #[inline(always)]
    pub const fn to_chess(&self) -> (char, u8) {
        ((b'a' + self.file()) as char, self.rank() + 1)
    }

    /// This square in raw array coordinates: `(column, row)` with row `0` being the eighth rank.
    #[inline(always)]
    pub const fn to_raw(&self) -> (u8, u8) {
        (self.file(), 7 - self.rank())
    }

    /// 0-based file of this square (`0` is the a-file).
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.0 % 8
    }

    /// 0-based rank of this square (`0` is the first rank).
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.0 / 8
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// A [`Bitboard`] containing only this square.
    #[inline(always)]
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard::new(1 << self.0)
    }

    /// Shifts this square by the provided file and rank deltas, returning `None` if that leaves the board.
    ///
    /// # Example
    /// ```
    /// # use chessrules_types::Square;
    /// assert_eq!(Square::E4.offset(1, 2), Some(Square::F6));
    /// assert_eq!(Square::H4.offset(1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file < 0 || rank < 0 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Moves `n` ranks toward the opponent of `team` (up the board for White, down for Black).
    #[inline(always)]
    pub const fn forward_by(&self, team: Team, n: i8) -> Option<Self> {
        match team {
            Team::White => self.offset(0, n),
            Team::Black => self.offset(0, -n),
        }
    }

    /// Moves `n` ranks toward `team`'s own side of the board.
    #[inline(always)]
    pub const fn backward_by(&self, team: Team, n: i8) -> Option<Self> {
        self.forward_by(team, -n)
    }

    /// Number of ranks between `self` and `other`.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Number of files between `self` and `other`.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().abs_diff(other.file())
    }

    /// Iterates over every square, a1 through h8.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (file, rank) = self.to_chess();
        write!(f, "{file}{rank}")
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Anything that can name a square at a board boundary.
///
/// Implemented for [`Square`], algebraic pairs like `('e', 4u8)`, raw array pairs like `(4u8, 4u8)`,
/// and strings like `"e4"`.
pub trait IntoSquare {
    fn into_square(self) -> Result<Square>;
}

impl IntoSquare for Square {
    #[inline(always)]
    fn into_square(self) -> Result<Square> {
        Ok(self)
    }
}

impl IntoSquare for (char, u8) {
    #[inline(always)]
    fn into_square(self) -> Result<Square> {
        Square::from_chess(self.0, self.1)
    }
}

impl IntoSquare for (u8, u8) {
    #[inline(always)]
    fn into_square(self) -> Result<Square> {
        Square::from_raw(self.0, self.1)
    }
}

impl IntoSquare for &str {
    #[inline(always)]
    fn into_square(self) -> Result<Square> {
        Square::from_uci(self)
    }
}
