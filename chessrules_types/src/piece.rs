/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

/// One of the two sides in a game of chess.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Team {
    #[default]
    White,
    Black,
}

impl Team {
    /// Number of teams.
    pub const COUNT: usize = 2;

    /// Both teams, White first.
    pub const ALL: [Self; Self::COUNT] = [Self::White, Self::Black];

    /// Returns the other team.
    ///
    /// # Example
    /// ```
    /// # use chessrules_types::Team;
    /// assert_eq!(Team::White.opponent(), Team::Black);
    /// assert_eq!(!Team::Black, Team::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Index of this team, for use in arrays of length [`Team::COUNT`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` if this team is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Parses a team from `w`/`b` (case-insensitive).
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'w' => Ok(Self::White),
            'b' => Ok(Self::Black),
            _ => bail!("Invalid char for Team: Got {c:?}. Expected 'w' or 'b'."),
        }
    }

    /// Lowercase name of this team.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Not for Team {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Team {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Invalid Team: Got {s:?}. Expected \"white\" or \"black\"."),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<T> Index<Team> for [T; Team::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Team) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Team> for [T; Team::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Team) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

/// The kind of a chess piece. The set is closed, so behavior is dispatched with a `match`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds, Pawn first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// Index of this kind, for use in arrays of length [`PieceKind::COUNT`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` for Bishops, Rooks, and Queens.
    #[inline(always)]
    pub const fn is_slider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Returns `true` if this kind slides along diagonals (Bishop, Queen).
    #[inline(always)]
    pub const fn is_diagonal_slider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Queen)
    }

    /// Returns `true` if this kind slides along files and ranks (Rook, Queen).
    #[inline(always)]
    pub const fn is_orthogonal_slider(&self) -> bool {
        matches!(self, Self::Rook | Self::Queen)
    }

    /// Uppercase letter for this kind (`P`, `N`, `B`, `R`, `Q`, `K`).
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Parses a piece kind from its letter (case-insensitive).
    ///
    /// # Example
    /// ```
    /// # use chessrules_types::PieceKind;
    /// assert_eq!(PieceKind::from_char('n').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'P' => Ok(Self::Pawn),
            'N' => Ok(Self::Knight),
            'B' => Ok(Self::Bishop),
            'R' => Ok(Self::Rook),
            'Q' => Ok(Self::Queen),
            'K' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {c:?}. Expected one of PNBRQK."),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        };
        write!(f, "{name}")
    }
}

/// A piece kind belonging to a team.
///
/// This is a plain value; see the board's piece records for identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    team: Team,
    kind: PieceKind,
}

impl Piece {
    /// Creates a new [`Piece`] of `kind` for `team`.
    #[inline(always)]
    pub const fn new(team: Team, kind: PieceKind) -> Self {
        Self { team, kind }
    }

    /// The [`Team`] of this piece.
    #[inline(always)]
    pub const fn team(&self) -> Team {
        self.team
    }

    /// The [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Letter for this piece: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use chessrules_types::{Piece, PieceKind, Team};
    /// assert_eq!(Piece::new(Team::White, PieceKind::Queen).char(), 'Q');
    /// assert_eq!(Piece::new(Team::Black, PieceKind::Queen).char(), 'q');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind.char();
        match self.team {
            Team::White => c,
            Team::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a piece from its letter; the case selects the team.
    pub fn from_char(c: char) -> Result<Self> {
        let kind = PieceKind::from_char(c)?;
        let team = if c.is_ascii_uppercase() {
            Team::White
        } else {
            Team::Black
        };
        Ok(Self::new(team, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_complement_is_an_involution() {
        for team in Team::ALL {
            assert_ne!(!team, team);
            assert_eq!(!!team, team);
        }
    }

    #[test]
    fn team_indexes_arrays() {
        let mut counts = [0u8; Team::COUNT];
        counts[Team::Black] += 2;
        assert_eq!(counts[Team::White], 0);
        assert_eq!(counts[Team::Black], 2);
    }

    #[test]
    fn piece_chars_round_trip() {
        for c in "PNBRQKpnbrqk".chars() {
            assert_eq!(Piece::from_char(c).unwrap().char(), c);
        }
    }

    #[test]
    fn slider_classification() {
        assert!(PieceKind::Queen.is_diagonal_slider() && PieceKind::Queen.is_orthogonal_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(PieceKind::Rook.is_orthogonal_slider() && !PieceKind::Rook.is_diagonal_slider());
    }
}
