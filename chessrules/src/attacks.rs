/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use super::{
    bishop_attacks, danger_zone, knight_attacks, pawn_attacks, rook_attacks, Bitboard, Board,
    PieceId, PieceKind, Result, Square, Team,
};

/// At most two pieces can check a King at once under the rules of chess.
pub const MAX_ATTACKERS: usize = 2;

/// An alias for an [`arrayvec::ArrayVec`] holding at most [`MAX_ATTACKERS`] attackers.
pub type AttackerList = ArrayVec<Attacker, MAX_ATTACKERS>;

/// An enemy piece currently checking a King.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Attacker {
    /// The checking piece.
    pub piece: PieceId,

    /// Where the checking piece stands.
    pub square: Square,

    /// Squares a friendly piece could occupy to interpose between the attacker and the King.
    ///
    /// For sliders this is the line strictly between the two; for Knights and Pawns it is only the attacker's own square.
    pub block: Bitboard,
}

impl Attacker {
    /// Every square that answers this check: capturing the attacker or blocking its line.
    #[inline(always)]
    pub fn answers(&self) -> Bitboard {
        self.block | self.square
    }
}

impl Board {
    /// All squares threatened by `team`.
    ///
    /// These are the squares the opposing King may not move to.
    pub fn danger_zone(&self, team: Team) -> Bitboard {
        let occupancy = self.occupancy();
        self.pieces_of(team)
            .fold(Bitboard::EMPTY_BOARD, |zone, record| {
                zone | danger_zone(record.piece(), record.square(), &occupancy)
            })
    }

    /// Returns `true` if `team`'s King stands in the opposing team's danger zone.
    ///
    /// Pass a previously computed danger zone of the *opposing* team to avoid recomputing it.
    ///
    /// # Example
    /// ```
    /// # use chessrules::prelude::*;
    /// let mut board = Board::new();
    /// board.place_king("e1", Team::White).unwrap();
    /// board.put("e8", PieceKind::Rook, Team::Black).unwrap();
    /// assert!(board.is_check(Team::White, None).unwrap());
    /// ```
    pub fn is_check(&self, team: Team, danger_zone: Option<Bitboard>) -> Result<bool> {
        let king = self.king(team)?;
        let zone = danger_zone.unwrap_or_else(|| self.danger_zone(team.opponent()));
        Ok(zone.contains(king.square()))
    }

    /// Finds the enemy pieces checking `team`'s King, with the squares that would block each one.
    ///
    /// The search pretends a Rook, Bishop, Knight, and Pawn of `team` stand on the King's square,
    /// and looks for an enemy piece of the matching kind on a square that phantom reaches.
    /// The phantom sliders stop at every piece, so nothing is seen through the enemy King.
    ///
    /// The search stops after two attackers, since no position reachable in chess has more.
    pub fn attackers(&self, team: Team) -> Result<AttackerList> {
        let king = self.king(team)?.square();
        let blockers = self.occupancy().occupied();

        let rook_lines = rook_attacks(king, blockers);
        let bishop_lines = bishop_attacks(king, blockers);
        let knight_jumps = knight_attacks(king);
        let pawn_threats = pawn_attacks(king, team);

        let mut attackers = AttackerList::new();
        for record in self.pieces_of(team.opponent()) {
            let square = record.square();

            let block = match record.kind() {
                PieceKind::Bishop | PieceKind::Queen if bishop_lines.contains(square) => {
                    bishop_lines & bishop_attacks(square, blockers)
                }
                PieceKind::Rook | PieceKind::Queen if rook_lines.contains(square) => {
                    rook_lines & rook_attacks(square, blockers)
                }
                PieceKind::Knight if knight_jumps.contains(square) => Bitboard::from(square),
                PieceKind::Pawn if pawn_threats.contains(square) => Bitboard::from(square),
                _ => continue,
            };

            attackers.push(Attacker {
                piece: record.id(),
                square,
                block,
            });

            if attackers.is_full() {
                break;
            }
        }

        Ok(attackers)
    }
}
