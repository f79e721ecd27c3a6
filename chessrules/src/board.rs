/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::BTreeMap, fmt};

use log::debug;

use super::{BoardError, IntoSquare, Occupancy, Piece, PieceKind, Result, Square, Team};

/// A stable handle to a piece on a [`Board`].
///
/// Handles are never reused, so a handle to a captured piece stays distinct from every live one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PieceId(usize);

impl PieceId {
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything a [`Board`] knows about one piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceRecord {
    id: PieceId,
    piece: Piece,
    square: Square,
    alive: bool,
}

impl PieceRecord {
    #[inline(always)]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline(always)]
    pub const fn team(&self) -> Team {
        self.piece.team()
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.piece.kind()
    }

    /// The square this piece stands on, or last stood on if it has been captured.
    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline(always)]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }
}

impl fmt::Display for PieceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.team(), self.kind(), self.square)
    }
}

/// En passant state left behind by the most recent move.
///
/// `square` is the square a Pawn skipped over on a two-square advance, and `pawn` is the Pawn that moved.
/// After a single Pawn step `square` is `None` but `pawn` is still recorded.
/// Both are `None` after any non-Pawn move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct EnPassant {
    pub square: Option<Square>,
    pub pawn: Option<PieceId>,
}

/// An 8x8 chessboard of pieces.
///
/// Occupancy is stored twice: a grid indexed by raw `(row, column)` coordinates, and a map keyed by [`Square`].
/// Both are only ever written together, so a square holds a piece exactly when the map has an entry for it.
#[derive(Clone, Debug, Default)]
pub struct Board {
    /// Every piece ever placed on this board, indexed by [`PieceId`].
    arena: Vec<PieceRecord>,

    /// Raw grid: `grid[row][column]`, with row `0` being the eighth rank.
    grid: [[Option<PieceId>; 8]; 8],

    /// Live pieces by square.
    occupants: BTreeMap<Square, PieceId>,

    kings: [Option<PieceId>; Team::COUNT],

    en_passant: EnPassant,
}

impl Board {
    /// Creates a new, empty [`Board`].
    ///
    /// # Example
    /// ```
    /// # use chessrules::Board;
    /// let board = Board::new();
    /// assert_eq!(board.len(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Board`] with the standard initial layout of 32 pieces.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::new();
        for square in Square::iter() {
            let kind = match square.rank() {
                0 | 7 => BACK_RANK[square.file() as usize],
                1 | 6 => PieceKind::Pawn,
                _ => continue,
            };
            let team = if square.rank() < 4 { Team::White } else { Team::Black };

            let placed = board.put(square, kind, team);
            debug_assert!(placed.is_ok(), "{square} is placed twice in the standard layout");
        }
        board
    }

    /// Places a new `team` piece of `kind` on an empty square, returning its handle.
    ///
    /// Placing a King also registers it as `team`'s King, exactly like [`Board::place_king`].
    ///
    /// # Example
    /// ```
    /// # use chessrules::prelude::*;
    /// let mut board = Board::new();
    /// board.put(('c', 4u8), PieceKind::Knight, Team::White).unwrap();
    /// assert_eq!(
    ///     board.put("c4", PieceKind::Rook, Team::Black),
    ///     Err(BoardError::OccupiedSquare(Square::C4))
    /// );
    /// ```
    pub fn put(&mut self, at: impl IntoSquare, kind: PieceKind, team: Team) -> Result<PieceId> {
        let square = at.into_square()?;
        if kind == PieceKind::King {
            return self.place_king_on(square, team);
        }
        self.spawn(Piece::new(team, kind), square)
    }

    /// Places `team`'s King on an empty square.
    ///
    /// Fails if `team` already has a King on the board.
    pub fn place_king(&mut self, at: impl IntoSquare, team: Team) -> Result<PieceId> {
        let square = at.into_square()?;
        self.place_king_on(square, team)
    }

    fn place_king_on(&mut self, square: Square, team: Team) -> Result<PieceId> {
        if self.king(team).is_ok() {
            return Err(BoardError::DuplicateKing(team));
        }
        let id = self.spawn(Piece::new(team, PieceKind::King), square)?;
        self.kings[team] = Some(id);
        Ok(id)
    }

    fn spawn(&mut self, piece: Piece, square: Square) -> Result<PieceId> {
        if self.occupants.contains_key(&square) {
            return Err(BoardError::OccupiedSquare(square));
        }

        let id = PieceId(self.arena.len());
        self.arena.push(PieceRecord {
            id,
            piece,
            square,
            alive: true,
        });
        self.insert(id, square);
        Ok(id)
    }

    /// Removes the piece on a square, returning its (now dead) record.
    ///
    /// This touches nothing else: en passant state and King references are left as they are.
    pub fn remove(&mut self, at: impl IntoSquare) -> Result<PieceRecord> {
        let square = at.into_square()?;
        let id = self.take(square).ok_or(BoardError::EmptySquare(square))?;
        let record = &mut self.arena[id.0];
        record.alive = false;
        Ok(*record)
    }

    /// Moves a piece to `to`. No enforcement of legality.
    ///
    /// Handles captures (including en passant) and records the en passant state for the next move.
    /// Returns the captured piece, if any.
    pub fn make_move(&mut self, id: PieceId, to: impl IntoSquare) -> Result<Option<PieceRecord>> {
        let to = to.into_square()?;
        let mover = self.piece(id).ok_or(BoardError::UnknownPiece(id))?;
        let from = mover.square();
        let team = mover.team();
        let mut captured = None;

        if mover.piece().is_pawn() {
            // Landing on the skipped square of an enemy double advance removes the Pawn that skipped it
            if Some(to) == self.en_passant.square {
                let victim = self
                    .en_passant
                    .pawn
                    .and_then(|pawn| self.piece(pawn))
                    .filter(|pawn| pawn.team() != team);
                if let Some(victim) = victim {
                    debug!("{mover} captures {victim} en passant on {to}");
                    captured = Some(self.destroy(victim.id()));
                }
            }

            let skipped = if from.file() == to.file() && from.distance_ranks(to) == 2 {
                from.forward_by(team, 1)
            } else {
                None
            };
            if let Some(skipped) = skipped {
                debug!("{mover} advances two squares; en passant square is {skipped}");
            }
            self.en_passant = EnPassant {
                square: skipped,
                pawn: Some(id),
            };
        } else {
            self.en_passant = EnPassant::default();
        }

        if let Some(occupant) = self.occupants.get(&to).copied().filter(|&other| other != id) {
            let victim = self.destroy(occupant);
            debug!("{mover} captures {victim}");
            captured = Some(victim);
        }

        self.take(from);
        self.arena[id.0].square = to;
        self.insert(id, to);

        Ok(captured)
    }

    /// Moves whatever piece stands on `from` to `to`. See [`Board::make_move`].
    pub fn move_from(
        &mut self,
        from: impl IntoSquare,
        to: impl IntoSquare,
    ) -> Result<Option<PieceRecord>> {
        let from = from.into_square()?;
        let id = self
            .occupants
            .get(&from)
            .copied()
            .ok_or(BoardError::EmptySquare(from))?;
        self.make_move(id, to)
    }

    /// Takes a piece off the board and marks it dead.
    fn destroy(&mut self, id: PieceId) -> PieceRecord {
        let square = self.arena[id.0].square;
        self.take(square);
        let record = &mut self.arena[id.0];
        record.alive = false;
        *record
    }

    /// Writes `id` into both the grid and the map.
    fn insert(&mut self, id: PieceId, square: Square) {
        let (column, row) = square.to_raw();
        self.grid[row as usize][column as usize] = Some(id);
        self.occupants.insert(square, id);
    }

    /// Clears `square` from both the grid and the map.
    fn take(&mut self, square: Square) -> Option<PieceId> {
        let (column, row) = square.to_raw();
        self.grid[row as usize][column as usize] = None;
        self.occupants.remove(&square)
    }

    /// Fetches the live piece on `square`, if there is one.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<PieceRecord> {
        self.occupants.get(&square).map(|id| self.arena[id.0])
    }

    /// Like [`Board::piece_at`], but accepts any coordinate form.
    ///
    /// # Example
    /// ```
    /// # use chessrules::prelude::*;
    /// let board = Board::standard();
    /// let by_name = board.lookup(('e', 1u8)).unwrap().unwrap();
    /// let by_raw = board.lookup((4u8, 7u8)).unwrap().unwrap();
    /// assert_eq!(by_name, by_raw);
    /// assert_eq!(by_name.kind(), PieceKind::King);
    /// ```
    pub fn lookup(&self, at: impl IntoSquare) -> Result<Option<PieceRecord>> {
        Ok(self.piece_at(at.into_square()?))
    }

    /// Fetches a piece by handle, if it is still on the board.
    #[inline(always)]
    pub fn piece(&self, id: PieceId) -> Option<PieceRecord> {
        self.arena.get(id.0).filter(|record| record.alive).copied()
    }

    /// Returns `true` if a piece stands on `square`.
    #[inline(always)]
    pub fn has(&self, square: Square) -> bool {
        self.occupants.contains_key(&square)
    }

    /// Iterates over all live pieces, ordered by square (a1 first).
    pub fn pieces(&self) -> impl Iterator<Item = PieceRecord> + '_ {
        self.occupants.values().map(|id| self.arena[id.0])
    }

    /// Iterates over the live pieces of `team`, ordered by square.
    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = PieceRecord> + '_ {
        self.pieces().filter(move |record| record.team() == team)
    }

    /// Number of live pieces.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Fetches `team`'s King.
    ///
    /// Fails if no King was placed for `team`, or if it has since been removed from the board.
    pub fn king(&self, team: Team) -> Result<PieceRecord> {
        self.kings[team]
            .and_then(|id| self.piece(id))
            .ok_or(BoardError::MissingKing(team))
    }

    /// En passant state left behind by the most recent move.
    #[inline(always)]
    pub const fn en_passant(&self) -> EnPassant {
        self.en_passant
    }

    /// The en passant square `team`'s Pawns may capture onto, if any.
    ///
    /// Only a square left behind by the *opposing* team's Pawn counts.
    pub fn en_passant_square_for(&self, team: Team) -> Option<Square> {
        let pawn = self.en_passant.pawn.and_then(|id| self.piece(id))?;
        if pawn.team() == team {
            return None;
        }
        self.en_passant.square
    }

    /// Builds an [`Occupancy`] snapshot of this board for piece geometry.
    pub fn occupancy(&self) -> Occupancy {
        let mut occupancy = Occupancy::new();
        for record in self.pieces() {
            occupancy.place(record.piece(), record.square());
        }
        occupancy
    }

    /// Checks the structural invariants of this board:
    /// * the grid and the square map describe the same occupancy,
    /// * every live piece's square matches its key in the map, and no dead piece is on the board,
    /// * every registered King that is alive is a King of the right team.
    pub fn is_consistent(&self) -> bool {
        for square in Square::iter() {
            let (column, row) = square.to_raw();
            if self.grid[row as usize][column as usize] != self.occupants.get(&square).copied() {
                return false;
            }
        }

        let map_agrees = self.occupants.iter().all(|(&square, &id)| {
            self.arena
                .get(id.0)
                .is_some_and(|record| record.alive && record.square == square)
        });
        let live_count = self.arena.iter().filter(|record| record.alive).count();

        let kings_agree = Team::ALL.into_iter().all(|team| match self.king(team) {
            Ok(king) => king.kind() == PieceKind::King && king.team() == team,
            Err(_) => true,
        });

        map_agrees && live_count == self.occupants.len() && kings_agree
    }
}

impl fmt::Display for Board {
    /// Draws the board with the eighth rank on top. White pieces are uppercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.grid.iter().enumerate() {
            write!(f, "{}|", 8 - row)?;
            for slot in squares {
                let c = slot.map(|id| self.arena[id.0].piece().char()).unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in 0..8 {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for file in 'a'..='h' {
            write!(f, " {file}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_refuses_occupied_squares() {
        let mut board = Board::new();
        board.put(Square::D4, PieceKind::Rook, Team::White).unwrap();
        assert_eq!(
            board.put(Square::D4, PieceKind::Knight, Team::Black),
            Err(BoardError::OccupiedSquare(Square::D4))
        );
        assert_eq!(board.len(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn put_accepts_raw_and_chess_coordinates() {
        let mut board = Board::new();
        let a = board.put(('a', 1u8), PieceKind::Rook, Team::White).unwrap();
        let b = board.put((7u8, 0u8), PieceKind::Rook, Team::Black).unwrap();
        assert_eq!(board.piece(a).unwrap().square(), Square::A1);
        assert_eq!(board.piece(b).unwrap().square(), Square::H8);
        assert!(matches!(
            board.put("j9", PieceKind::Pawn, Team::White),
            Err(BoardError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn place_king_registers_the_king() {
        let mut board = Board::new();
        assert_eq!(board.king(Team::White), Err(BoardError::MissingKing(Team::White)));

        let id = board.place_king(Square::E1, Team::White).unwrap();
        assert_eq!(board.king(Team::White).unwrap().id(), id);
        assert_eq!(
            board.place_king(Square::E2, Team::White),
            Err(BoardError::DuplicateKing(Team::White))
        );

        // Putting a King goes through the same path
        let black = board.put(Square::E8, PieceKind::King, Team::Black).unwrap();
        assert_eq!(board.king(Team::Black).unwrap().id(), black);
    }

    #[test]
    fn remove_is_pure() {
        let mut board = Board::new();
        board.put(Square::D2, PieceKind::Pawn, Team::White).unwrap();
        board.move_from(Square::D2, Square::D4).unwrap();
        let ep = board.en_passant();

        let removed = board.remove(Square::D4).unwrap();
        assert!(!removed.is_alive());
        assert!(!board.has(Square::D4));
        assert_eq!(board.en_passant(), ep);
        assert_eq!(board.remove(Square::D4), Err(BoardError::EmptySquare(Square::D4)));
        assert!(board.is_consistent());
    }

    #[test]
    fn removing_a_king_makes_it_missing() {
        let mut board = Board::new();
        board.place_king(Square::E1, Team::White).unwrap();
        board.remove(Square::E1).unwrap();
        assert_eq!(board.king(Team::White), Err(BoardError::MissingKing(Team::White)));
        assert!(board.is_consistent());
    }

    #[test]
    fn move_updates_both_representations() {
        let mut board = Board::new();
        let rook = board.put(Square::A1, PieceKind::Rook, Team::White).unwrap();
        let captured = board.make_move(rook, Square::A5).unwrap();

        assert!(captured.is_none());
        assert!(!board.has(Square::A1));
        assert_eq!(board.piece_at(Square::A5).unwrap().id(), rook);
        assert_eq!(board.piece(rook).unwrap().square(), Square::A5);
        assert!(board.is_consistent());
    }

    #[test]
    fn move_captures_occupant() {
        let mut board = Board::new();
        let rook = board.put(Square::A1, PieceKind::Rook, Team::White).unwrap();
        let knight = board.put(Square::A7, PieceKind::Knight, Team::Black).unwrap();

        let captured = board.make_move(rook, Square::A7).unwrap().unwrap();
        assert_eq!(captured.id(), knight);
        assert!(board.piece(knight).is_none());
        assert_eq!(board.pieces().count(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn move_of_unknown_piece_fails() {
        let mut board = Board::new();
        let rook = board.put(Square::A1, PieceKind::Rook, Team::White).unwrap();
        board.remove(Square::A1).unwrap();
        assert_eq!(
            board.make_move(rook, Square::A2),
            Err(BoardError::UnknownPiece(rook))
        );
        assert_eq!(board.move_from(Square::B1, Square::B2), Err(BoardError::EmptySquare(Square::B1)));
    }

    #[test]
    fn en_passant_lifetime_is_one_move() {
        let mut board = Board::new();
        let pawn = board.put(Square::D2, PieceKind::Pawn, Team::White).unwrap();
        let knight = board.put(Square::G8, PieceKind::Knight, Team::Black).unwrap();

        board.make_move(pawn, Square::D4).unwrap();
        assert_eq!(
            board.en_passant(),
            EnPassant {
                square: Some(Square::D3),
                pawn: Some(pawn)
            }
        );
        assert_eq!(board.en_passant_square_for(Team::Black), Some(Square::D3));
        assert_eq!(board.en_passant_square_for(Team::White), None);

        board.make_move(knight, Square::F6).unwrap();
        assert_eq!(board.en_passant(), EnPassant::default());
    }

    #[test]
    fn single_pawn_step_records_pawn_without_square() {
        let mut board = Board::new();
        let pawn = board.put(Square::D2, PieceKind::Pawn, Team::White).unwrap();
        board.make_move(pawn, Square::D3).unwrap();
        assert_eq!(
            board.en_passant(),
            EnPassant {
                square: None,
                pawn: Some(pawn)
            }
        );
    }

    #[test]
    fn en_passant_capture_removes_the_skipping_pawn() {
        let mut board = Board::new();
        let white = board.put(Square::D2, PieceKind::Pawn, Team::White).unwrap();
        let black = board.put(Square::E4, PieceKind::Pawn, Team::Black).unwrap();

        board.make_move(white, Square::D4).unwrap();
        let captured = board.make_move(black, Square::D3).unwrap().unwrap();

        assert_eq!(captured.id(), white);
        assert!(!board.has(Square::D4));
        assert_eq!(board.piece_at(Square::D3).unwrap().id(), black);
        assert_eq!(board.len(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(board.len(), 32);
        assert_eq!(board.king(Team::White).unwrap().square(), Square::E1);
        assert_eq!(board.king(Team::Black).unwrap().square(), Square::E8);
        assert_eq!(board.piece_at(Square::D8).unwrap().kind(), PieceKind::Queen);
        assert_eq!(board.pieces_of(Team::Black).count(), 16);
        assert!(board.is_consistent());
    }

    #[test]
    fn display_draws_eighth_rank_first() {
        let text = Board::standard().to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("8| r n b q k b n r"));
        assert_eq!(lines.nth(6), Some("1| R N B Q K B N R"));
    }
}
