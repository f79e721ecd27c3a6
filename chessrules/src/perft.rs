/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, PieceId, Result, Square, Team};

/// Collects every legal `(piece, destination)` pair for `team`.
fn legal_pairs(board: &Board, team: Team) -> Result<Vec<(PieceId, Square, Square)>> {
    let moves = board.legal_moves(team)?;
    let mut pairs = Vec::new();
    for (from, targets) in moves {
        let Some(record) = board.piece_at(from) else {
            continue;
        };
        pairs.extend(targets.into_iter().map(|to| (record.id(), from, to)));
    }
    Ok(pairs)
}

/// Counts the leaf nodes of the legal move tree rooted at `board`, `team` to move, `depth` plies deep.
///
/// Teams alternate every ply. Both Kings must be on the board.
///
/// # Example
/// ```
/// # use chessrules::prelude::*;
/// assert_eq!(perft(&Board::standard(), Team::White, 2).unwrap(), 400);
/// ```
pub fn perft(board: &Board, team: Team, depth: usize) -> Result<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let pairs = legal_pairs(board, team)?;

    // Bulk counting at the frontier
    if depth == 1 {
        return Ok(pairs.len() as u64);
    }

    let mut nodes = 0;
    for (id, _, to) in pairs {
        let mut child = board.clone();
        child.make_move(id, to)?;
        nodes += perft(&child, team.opponent(), depth - 1)?;
    }
    Ok(nodes)
}

/// Like [`perft`], but prints the number of nodes reachable after each root move.
///
/// Lines read `e2e4: 600`, ordered by source square, then destination.
pub fn splitperft(board: &Board, team: Team, depth: usize) -> Result<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let mut total = 0;
    for (id, from, to) in legal_pairs(board, team)? {
        let mut child = board.clone();
        child.make_move(id, to)?;
        let nodes = perft(&child, team.opponent(), depth - 1)?;
        println!("{from}{to}: {nodes}");
        total += nodes;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_position_shallow_counts() {
        let board = Board::standard();
        assert_eq!(perft(&board, Team::White, 0).unwrap(), 1);
        assert_eq!(perft(&board, Team::White, 1).unwrap(), 20);
        assert_eq!(perft(&board, Team::Black, 1).unwrap(), 20);
        assert_eq!(perft(&board, Team::White, 2).unwrap(), 400);
    }

    #[test]
    fn splitperft_matches_perft() {
        let board = Board::standard();
        assert_eq!(
            splitperft(&board, Team::White, 2).unwrap(),
            perft(&board, Team::White, 2).unwrap()
        );
    }

    #[test]
    fn perft_requires_kings() {
        let mut board = Board::new();
        board.put("e2", crate::PieceKind::Pawn, Team::White).unwrap();
        assert!(perft(&board, Team::White, 1).is_err());
    }

    #[test]
    fn perft_leaves_the_root_untouched() {
        let board = Board::standard();
        let before = board.to_string();
        perft(&board, Team::White, 2).unwrap();
        assert_eq!(board.to_string(), before);
    }
}
