/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use log::trace;

use super::{
    bishop_attacks, danger_zone, raw_targets, rook_attacks, Bitboard, Board, Occupancy, PieceId,
    PieceKind, Result, Square, Team, DIAGONALS, ORTHOGONALS,
};

/// Legal destinations for every live piece of a team, keyed by the square the piece stands on.
pub type LegalMoves = BTreeMap<Square, Bitboard>;

/// A piece that may not leave the line between its King and an enemy slider.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pin {
    /// The pinned piece.
    pub piece: PieceId,

    /// Where the pinned piece stands.
    pub square: Square,

    /// The squares the pinned piece may still move to: the line from the King up to and including the pinner.
    pub ray: Bitboard,
}

/// Finds every `team` piece pinned against a King of `team` standing on `king`.
///
/// Walks each of the eight lines out of the King. A line pins when its first piece is friendly
/// and its second piece is an enemy slider that moves along that line.
///
/// Returns the pinned squares along with the ray each one is confined to.
pub fn king_pins(
    king: Square,
    team: Team,
    occupancy: &Occupancy,
) -> ArrayVec<(Square, Bitboard), 8> {
    let opponent = team.opponent();
    let lines = DIAGONALS
        .iter()
        .map(|&delta| (delta, occupancy.diagonal_sliders(opponent)))
        .chain(
            ORTHOGONALS
                .iter()
                .map(|&delta| (delta, occupancy.orthogonal_sliders(opponent))),
        );

    let mut pins = ArrayVec::new();
    for ((file_delta, rank_delta), pinners) in lines {
        let mut ray = Bitboard::EMPTY_BOARD;
        let mut pinned = None;
        let mut current = king;

        while let Some(next) = current.offset(file_delta, rank_delta) {
            ray.set(next);
            current = next;

            if !occupancy.occupied().contains(next) {
                continue;
            }

            if occupancy.team(team).contains(next) {
                // A second friendly piece on the line means nothing here is pinned
                if pinned.is_some() {
                    break;
                }
                pinned = Some(next);
                continue;
            }

            // First enemy piece on the line ends the walk either way
            if let Some(pinned) = pinned {
                if pinners.contains(next) {
                    pins.push((pinned, ray));
                }
            }
            break;
        }
    }

    pins
}

/// Returns `true` if capturing en passant from `from` onto `ep_square` would leave `team`'s King attacked by a slider.
///
/// Both the capturing Pawn and the captured Pawn leave the same rank at once, which is the one case a pin scan cannot see.
fn en_passant_exposes_king(
    king: Square,
    team: Team,
    from: Square,
    ep_square: Square,
    occupancy: &Occupancy,
) -> bool {
    let Some(victim) = ep_square.backward_by(team, 1) else {
        return false;
    };
    let opponent = team.opponent();
    let blockers_after = (occupancy.occupied() - from - victim) | ep_square;

    let orthogonal = rook_attacks(king, blockers_after) & occupancy.orthogonal_sliders(opponent);
    let diagonal = bishop_attacks(king, blockers_after) & occupancy.diagonal_sliders(opponent);
    orthogonal.is_nonempty() || diagonal.is_nonempty()
}

impl Board {
    /// Finds the pieces of `team` that are pinned against their King.
    pub fn pins(&self, team: Team) -> Result<Vec<Pin>> {
        let king = self.king(team)?;
        let occupancy = self.occupancy();

        Ok(king_pins(king.square(), team, &occupancy)
            .into_iter()
            .filter_map(|(square, ray)| {
                let piece = self.piece_at(square)?.id();
                Some(Pin { piece, square, ray })
            })
            .collect())
    }

    /// Computes the legal moves of every live `team` piece.
    ///
    /// Every piece gets an entry, including pieces that cannot move at all.
    /// If every entry is empty, `team` is checkmated (when [`Board::is_check`]) or stalemated; telling those apart is left to the caller.
    ///
    /// # Example
    /// ```
    /// # use chessrules::prelude::*;
    /// let mut board = Board::new();
    /// board.place_king("e1", Team::White).unwrap();
    /// board.place_king("e8", Team::Black).unwrap();
    /// board.put("a1", PieceKind::Rook, Team::White).unwrap();
    /// board.put("a8", PieceKind::Rook, Team::Black).unwrap();
    ///
    /// let moves = board.legal_moves(Team::White).unwrap();
    /// assert_eq!(moves.len(), 2);
    /// assert!(moves[&Square::A1].contains(Square::A8));
    /// assert_eq!(moves[&Square::E1].population(), 5);
    /// ```
    pub fn legal_moves(&self, team: Team) -> Result<LegalMoves> {
        let king = self.king(team)?;
        let king_square = king.square();
        let occupancy = self.occupancy();
        let ep_square = self.en_passant_square_for(team);

        // Pseudo-legal moves for our pieces, and everything the enemy threatens
        let mut moves = LegalMoves::new();
        let mut enemy_zone = Bitboard::EMPTY_BOARD;
        for record in self.pieces() {
            let (piece, square) = (record.piece(), record.square());
            if record.team() != team {
                enemy_zone |= danger_zone(piece, square, &occupancy);
                continue;
            }

            let mut targets = raw_targets(piece, square, &occupancy, ep_square);
            if let Some(ep) = ep_square.filter(|&ep| piece.is_pawn() && targets.contains(ep)) {
                if en_passant_exposes_king(king_square, team, square, ep, &occupancy) {
                    trace!("en passant from {square} to {ep} would expose the {team} King");
                    targets.clear(ep);
                }
            }
            moves.insert(square, targets);
        }

        // Pinned pieces stay on their pin ray
        for (square, ray) in king_pins(king_square, team, &occupancy) {
            trace!("{square} is pinned to the {team} King along {ray:?}");
            if let Some(targets) = moves.get_mut(&square) {
                *targets &= ray;
            }
        }

        let attackers = self.attackers(team)?;
        trace!("{team} King on {king_square} has {} attacker(s)", attackers.len());

        match attackers.as_slice() {
            [] => {}

            // Single check: capture the attacker or block its line
            [attacker] => {
                let answers = attacker.answers();
                let ep_removes_attacker = self.en_passant().pawn == Some(attacker.piece);

                for (&square, targets) in moves.iter_mut() {
                    if square == king_square {
                        continue;
                    }

                    let before = *targets;
                    *targets &= answers;

                    // En passant lands beside the attacking Pawn, not on it
                    let is_pawn = self
                        .piece_at(square)
                        .is_some_and(|record| record.kind() == PieceKind::Pawn);
                    if let Some(ep) = ep_square.filter(|&ep| is_pawn && before.contains(ep)) {
                        if ep_removes_attacker {
                            targets.set(ep);
                        }
                    }
                }
            }

            // Double check: only the King may move
            _ => {
                for (&square, targets) in moves.iter_mut() {
                    if square != king_square {
                        *targets = Bitboard::EMPTY_BOARD;
                    }
                }
            }
        }

        if let Some(targets) = moves.get_mut(&king_square) {
            *targets -= enemy_zone;
        }

        Ok(moves)
    }
}
