/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use chessrules::prelude::*;

fn board_with(pieces: &[(&str, PieceKind, Team)]) -> Board {
    let mut board = Board::new();
    for &(square, kind, team) in pieces {
        board.put(square, kind, team).unwrap();
    }
    board
}

#[test]
fn rook_on_the_same_file_checks_the_king() {
    let mut board = Board::new();
    board.place_king("e1", Team::White).unwrap();
    board.put("e8", PieceKind::Rook, Team::Black).unwrap();

    assert!(board.is_check(Team::White, None).unwrap());

    let attackers = board.attackers(Team::White).unwrap();
    assert_eq!(attackers.len(), 1);
    assert_eq!(attackers[0].square, Square::E8);

    let king_moves = board.legal_moves(Team::White).unwrap()[&Square::E1];
    assert!(!king_moves.contains(Square::E2));
    assert_eq!(king_moves & board.danger_zone(Team::Black), Bitboard::EMPTY_BOARD);
    assert_eq!(king_moves.population(), 4);
}

#[test]
fn blocked_rook_does_not_check() {
    let board = board_with(&[
        ("e1", PieceKind::King, Team::White),
        ("e4", PieceKind::Knight, Team::White),
        ("e8", PieceKind::Rook, Team::Black),
    ]);
    assert!(!board.is_check(Team::White, None).unwrap());
    assert!(board.attackers(Team::White).unwrap().is_empty());
}

#[test]
fn pinned_bishop_only_moves_along_the_pin() {
    let board = board_with(&[
        ("e1", PieceKind::King, Team::White),
        ("h4", PieceKind::Queen, Team::Black),
        ("f2", PieceKind::Bishop, Team::White),
    ]);
    let moves = board.legal_moves(Team::White).unwrap();
    assert_eq!(moves[&Square::F2], Bitboard::from([Square::G3, Square::H4]));
}

#[test]
fn en_passant_removes_the_advanced_pawn() {
    let mut board = board_with(&[
        ("a1", PieceKind::King, Team::White),
        ("h8", PieceKind::King, Team::Black),
        ("d2", PieceKind::Pawn, Team::White),
        ("e4", PieceKind::Pawn, Team::Black),
    ]);
    let white_pawn = board.piece_at(Square::D2).unwrap().id();

    board.move_from("d2", "d4").unwrap();
    assert_eq!(board.en_passant().square, Some(Square::D3));
    assert_eq!(board.en_passant().pawn, Some(white_pawn));

    let moves = board.legal_moves(Team::Black).unwrap();
    assert_eq!(moves[&Square::E4], Bitboard::from([Square::D3, Square::E3]));

    let captured = board.move_from("e4", "d3").unwrap().unwrap();
    assert_eq!(captured.id(), white_pawn);
    assert!(!captured.is_alive());
    assert!(board.piece(white_pawn).is_none());
    assert!(!board.has(Square::D4));
    assert_eq!(board.piece_at(Square::D3).unwrap().team(), Team::Black);
    assert_eq!(board.en_passant().square, None);
    assert!(board.is_consistent());
}

#[test]
fn en_passant_expires_after_any_other_move() {
    let mut board = board_with(&[
        ("a1", PieceKind::King, Team::White),
        ("h8", PieceKind::King, Team::Black),
        ("d2", PieceKind::Pawn, Team::White),
        ("e4", PieceKind::Pawn, Team::Black),
    ]);
    board.move_from("d2", "d4").unwrap();
    board.move_from("h8", "g8").unwrap();
    board.move_from("a1", "b1").unwrap();

    assert_eq!(board.en_passant().square, None);
    let moves = board.legal_moves(Team::Black).unwrap();
    assert_eq!(moves[&Square::E4], Bitboard::from(Square::E3));
}

#[test]
fn sliding_rays_stop_at_the_first_blocker() {
    let board = board_with(&[
        ("a1", PieceKind::King, Team::White),
        ("h8", PieceKind::King, Team::Black),
        ("d4", PieceKind::Queen, Team::White),
        ("d6", PieceKind::Pawn, Team::Black),
        ("f4", PieceKind::Knight, Team::White),
    ]);
    let moves = board.legal_moves(Team::White).unwrap();
    let queen = moves[&Square::D4];

    assert!(queen.contains(Square::D5));
    assert!(queen.contains(Square::D6));
    assert!(!queen.contains(Square::D7));
    assert!(queen.contains(Square::E4));
    assert!(!queen.contains(Square::F4));
    assert!(!queen.contains(Square::G4));
}

#[test]
fn moving_updates_both_representations() {
    let mut board = board_with(&[
        ("e1", PieceKind::King, Team::White),
        ("e8", PieceKind::King, Team::Black),
        ("c3", PieceKind::Knight, Team::White),
        ("d5", PieceKind::Pawn, Team::Black),
    ]);
    let knight = board.piece_at(Square::C3).unwrap().id();

    let captured = board.make_move(knight, "d5").unwrap().unwrap();
    assert_eq!(captured.kind(), PieceKind::Pawn);
    assert_eq!(board.piece(knight).unwrap().square(), Square::D5);
    assert!(!board.has(Square::C3));
    assert_eq!(board.pieces_of(Team::Black).count(), 1);
    assert!(board.is_consistent());
}

#[test]
fn checkmate_leaves_no_moves() {
    // Back rank mate
    let board = board_with(&[
        ("g1", PieceKind::King, Team::White),
        ("f2", PieceKind::Pawn, Team::White),
        ("g2", PieceKind::Pawn, Team::White),
        ("h2", PieceKind::Pawn, Team::White),
        ("a1", PieceKind::Rook, Team::Black),
        ("h8", PieceKind::King, Team::Black),
    ]);
    assert!(board.is_check(Team::White, None).unwrap());
    let moves = board.legal_moves(Team::White).unwrap();
    assert!(moves.values().all(Bitboard::is_empty));
}

#[test]
fn stalemate_leaves_no_moves_without_check() {
    let board = board_with(&[
        ("a8", PieceKind::King, Team::Black),
        ("b6", PieceKind::Queen, Team::White),
        ("h1", PieceKind::King, Team::White),
    ]);
    assert!(!board.is_check(Team::Black, None).unwrap());
    let moves = board.legal_moves(Team::Black).unwrap();
    assert!(moves.values().all(Bitboard::is_empty));
}

#[test]
fn perft_from_the_standard_layout() {
    let board = Board::standard();
    assert_eq!(perft(&board, Team::White, 1).unwrap(), 20);
    assert_eq!(perft(&board, Team::White, 2).unwrap(), 400);
    assert_eq!(perft(&board, Team::White, 3).unwrap(), 8902);
}
