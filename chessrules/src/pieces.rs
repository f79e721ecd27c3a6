/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Bitboard, Piece, PieceKind, Square, Team};

/// File and rank deltas of the four diagonal directions.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// File and rank deltas of the four orthogonal directions.
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// A snapshot of which squares are occupied, by whom, and where the Kings stand.
///
/// This is everything piece geometry needs to know about the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Occupancy {
    teams: [Bitboard; Team::COUNT],
    kings: [Bitboard; Team::COUNT],
    diagonal_sliders: [Bitboard; Team::COUNT],
    orthogonal_sliders: [Bitboard; Team::COUNT],
}

impl Occupancy {
    /// Creates an empty [`Occupancy`].
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            teams: [Bitboard::EMPTY_BOARD; Team::COUNT],
            kings: [Bitboard::EMPTY_BOARD; Team::COUNT],
            diagonal_sliders: [Bitboard::EMPTY_BOARD; Team::COUNT],
            orthogonal_sliders: [Bitboard::EMPTY_BOARD; Team::COUNT],
        }
    }

    /// Marks `square` as occupied by `piece`.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        let team = piece.team();
        self.teams[team].set(square);
        if piece.is_king() {
            self.kings[team].set(square);
        }
        if piece.kind().is_diagonal_slider() {
            self.diagonal_sliders[team].set(square);
        }
        if piece.kind().is_orthogonal_slider() {
            self.orthogonal_sliders[team].set(square);
        }
    }

    /// Marks `square` as empty.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        for team in Team::ALL {
            self.teams[team].clear(square);
            self.kings[team].clear(square);
            self.diagonal_sliders[team].clear(square);
            self.orthogonal_sliders[team].clear(square);
        }
    }

    /// All occupied squares.
    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.teams[Team::White] | self.teams[Team::Black]
    }

    /// Squares occupied by `team`.
    #[inline(always)]
    pub fn team(&self, team: Team) -> Bitboard {
        self.teams[team]
    }

    /// The square of `team`'s King, as a [`Bitboard`] (empty if there is none).
    #[inline(always)]
    pub fn king(&self, team: Team) -> Bitboard {
        self.kings[team]
    }

    /// Squares of `team`'s Bishops and Queens.
    #[inline(always)]
    pub fn diagonal_sliders(&self, team: Team) -> Bitboard {
        self.diagonal_sliders[team]
    }

    /// Squares of `team`'s Rooks and Queens.
    #[inline(always)]
    pub fn orthogonal_sliders(&self, team: Team) -> Bitboard {
        self.orthogonal_sliders[team]
    }
}

/// Walks from `square` in direction `delta`, stopping on (and including) the first square in `blockers`.
#[inline(always)]
fn ray(square: Square, (file_delta, rank_delta): (i8, i8), blockers: Bitboard) -> Bitboard {
    let mut ray = Bitboard::EMPTY_BOARD;
    let mut current = square;
    while let Some(next) = current.offset(file_delta, rank_delta) {
        ray.set(next);
        if blockers.contains(next) {
            break;
        }
        current = next;
    }
    ray
}

#[inline(always)]
fn slide(square: Square, directions: &[(i8, i8)], blockers: Bitboard) -> Bitboard {
    directions
        .iter()
        .fold(Bitboard::EMPTY_BOARD, |acc, &delta| acc | ray(square, delta, blockers))
}

#[inline(always)]
fn jumps(square: Square, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(file_delta, rank_delta)| square.offset(file_delta, rank_delta))
        .collect()
}

/// Squares a Bishop on `square` reaches, stopping on (and including) the first blocker in each direction.
///
/// # Example
/// ```
/// # use chessrules::*;
/// let blockers = Bitboard::from(Square::C3);
/// assert_eq!(bishop_attacks(Square::A1, blockers), Bitboard::from([Square::B2, Square::C3]));
/// ```
#[inline(always)]
pub fn bishop_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    slide(square, &DIAGONALS, blockers)
}

/// Squares a Rook on `square` reaches, stopping on (and including) the first blocker in each direction.
#[inline(always)]
pub fn rook_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    slide(square, &ORTHOGONALS, blockers)
}

/// Union of [`bishop_attacks`] and [`rook_attacks`].
#[inline(always)]
pub fn queen_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    bishop_attacks(square, blockers) | rook_attacks(square, blockers)
}

/// The (up to) eight L-shaped jumps from `square`.
#[inline(always)]
pub fn knight_attacks(square: Square) -> Bitboard {
    jumps(square, &KNIGHT_OFFSETS)
}

/// The (up to) eight squares adjacent to `square`.
#[inline(always)]
pub fn king_attacks(square: Square) -> Bitboard {
    jumps(square, &KING_OFFSETS)
}

/// The two forward-diagonal squares a `team` Pawn on `square` threatens.
#[inline(always)]
pub fn pawn_attacks(square: Square, team: Team) -> Bitboard {
    let forward = if team.is_white() { 1 } else { -1 };
    jumps(square, &[(-1, forward), (1, forward)])
}

/// Forward pushes of a `team` Pawn on `square`.
///
/// One square if it is empty; two from the starting rank if both squares are empty.
pub fn pawn_pushes(square: Square, team: Team, blockers: Bitboard) -> Bitboard {
    let mut pushes = Bitboard::EMPTY_BOARD;
    let Some(single) = square.forward_by(team, 1).filter(|sq| !blockers.contains(*sq)) else {
        return pushes;
    };
    pushes.set(single);

    if square.rank() == pawn_start_rank(team) {
        if let Some(double) = single.forward_by(team, 1).filter(|sq| !blockers.contains(*sq)) {
            pushes.set(double);
        }
    }

    pushes
}

/// 0-based rank on which `team`'s Pawns start.
#[inline(always)]
pub const fn pawn_start_rank(team: Team) -> u8 {
    match team {
        Team::White => 1,
        Team::Black => 6,
    }
}

/// Squares `piece` on `square` could physically move to, ignoring check and pins.
///
/// Captures of enemy pieces are included; squares held by the piece's own team never are.
/// For Pawns, `ep_square` is the en passant square available to this Pawn, if any.
pub fn raw_targets(
    piece: Piece,
    square: Square,
    occupancy: &Occupancy,
    ep_square: Option<Square>,
) -> Bitboard {
    let team = piece.team();
    let blockers = occupancy.occupied();
    let own = occupancy.team(team);

    match piece.kind() {
        PieceKind::Pawn => {
            let mut captures = occupancy.team(team.opponent());
            if let Some(ep) = ep_square {
                captures.set(ep);
            }
            pawn_pushes(square, team, blockers) | (pawn_attacks(square, team) & captures)
        }
        PieceKind::Knight => knight_attacks(square) - own,
        PieceKind::Bishop => bishop_attacks(square, blockers) - own,
        PieceKind::Rook => rook_attacks(square, blockers) - own,
        PieceKind::Queen => queen_attacks(square, blockers) - own,
        PieceKind::King => king_attacks(square) - own,
    }
}

/// Squares `piece` on `square` threatens, for King-safety purposes.
///
/// Unlike [`raw_targets`], this includes squares held by the piece's own team (they are defended),
/// Pawns threaten their diagonals whether or not anything stands there,
/// and sliders see through the enemy King so it cannot escape by stepping along the line of attack.
pub fn danger_zone(piece: Piece, square: Square, occupancy: &Occupancy) -> Bitboard {
    let team = piece.team();
    let blockers = occupancy.occupied() - occupancy.king(team.opponent());

    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(square, team),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, blockers),
        PieceKind::Rook => rook_attacks(square, blockers),
        PieceKind::Queen => queen_attacks(square, blockers),
        PieceKind::King => king_attacks(square),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupancy(pieces: &[(Square, Piece)]) -> Occupancy {
        let mut occ = Occupancy::new();
        for &(square, piece) in pieces {
            occ.place(piece, square);
        }
        occ
    }

    const WHITE_ROOK: Piece = Piece::new(Team::White, PieceKind::Rook);
    const WHITE_PAWN: Piece = Piece::new(Team::White, PieceKind::Pawn);
    const BLACK_PAWN: Piece = Piece::new(Team::Black, PieceKind::Pawn);
    const BLACK_KING: Piece = Piece::new(Team::Black, PieceKind::King);

    #[test]
    fn rook_blockers() {
        let occ = occupancy(&[
            (Square::D4, WHITE_ROOK),
            (Square::D2, BLACK_PAWN),
            (Square::D6, WHITE_PAWN),
            (Square::B4, BLACK_PAWN),
        ]);

        let moves = raw_targets(WHITE_ROOK, Square::D4, &occ, None);
        let expected = Bitboard::from([
            Square::D3,
            Square::D2,
            Square::D5,
            Square::C4,
            Square::B4,
            Square::E4,
            Square::F4,
            Square::G4,
            Square::H4,
        ]);

        assert_eq!(moves, expected);
    }

    #[test]
    fn knight_in_corner() {
        assert_eq!(knight_attacks(Square::A1), Bitboard::from([Square::B3, Square::C2]));
        assert_eq!(knight_attacks(Square::D4).population(), 8);
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        let empty = Bitboard::EMPTY_BOARD;
        assert_eq!(
            pawn_pushes(Square::E2, Team::White, empty),
            Bitboard::from([Square::E3, Square::E4])
        );
        assert_eq!(
            pawn_pushes(Square::E2, Team::White, Bitboard::from(Square::E4)),
            Bitboard::from(Square::E3)
        );
        assert!(pawn_pushes(Square::E2, Team::White, Bitboard::from(Square::E3)).is_empty());
        assert_eq!(
            pawn_pushes(Square::E7, Team::Black, empty),
            Bitboard::from([Square::E6, Square::E5])
        );
        assert_eq!(pawn_pushes(Square::E3, Team::White, empty), Bitboard::from(Square::E4));
    }

    #[test]
    fn pawn_captures_only_enemies_or_en_passant() {
        let occ = occupancy(&[
            (Square::E5, WHITE_PAWN),
            (Square::F6, BLACK_PAWN),
            (Square::D5, BLACK_PAWN),
        ]);

        let without_ep = raw_targets(WHITE_PAWN, Square::E5, &occ, None);
        assert_eq!(without_ep, Bitboard::from([Square::E6, Square::F6]));

        let with_ep = raw_targets(WHITE_PAWN, Square::E5, &occ, Some(Square::D6));
        assert_eq!(with_ep, Bitboard::from([Square::E6, Square::F6, Square::D6]));
    }

    #[test]
    fn pawn_danger_zone_ignores_occupancy() {
        let occ = Occupancy::new();
        assert_eq!(
            danger_zone(BLACK_PAWN, Square::E4, &occ),
            Bitboard::from([Square::D3, Square::F3])
        );
    }

    #[test]
    fn slider_danger_zone_sees_through_enemy_king() {
        let occ = occupancy(&[(Square::A1, WHITE_ROOK), (Square::D1, BLACK_KING)]);

        let targets = raw_targets(WHITE_ROOK, Square::A1, &occ, None);
        assert!(targets.contains(Square::D1));
        assert!(!targets.contains(Square::E1));

        let danger = danger_zone(WHITE_ROOK, Square::A1, &occ);
        assert!(danger.contains(Square::E1));
        assert!(danger.contains(Square::H1));
    }

    #[test]
    fn danger_zone_includes_defended_pieces() {
        let occ = occupancy(&[(Square::A1, WHITE_ROOK), (Square::A3, WHITE_PAWN)]);
        let danger = danger_zone(WHITE_ROOK, Square::A1, &occ);
        assert!(danger.contains(Square::A3));
        assert!(!danger.contains(Square::A4));
        assert!(!raw_targets(WHITE_ROOK, Square::A1, &occ, None).contains(Square::A3));
    }
}
