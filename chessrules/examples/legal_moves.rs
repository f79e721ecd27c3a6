/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;

use chessrules::prelude::*;

/// Set up a position and print the legal moves of one team.
#[derive(Debug, Parser)]
struct Cli {
    /// White pieces, as a comma-separated list like `Ke1,Bf2,Pd2`.
    /// If neither team is given, the standard layout is used.
    #[arg(short, long, value_delimiter = ',')]
    white: Vec<String>,

    /// Black pieces, in the same format as `--white`.
    #[arg(short, long, value_delimiter = ',')]
    black: Vec<String>,

    /// Moves to apply before querying, like `d2d4,e7e5`.
    #[arg(short, long, value_delimiter = ',')]
    moves: Vec<String>,

    /// The team whose legal moves are printed.
    #[arg(short, long, default_value = "white")]
    team: Team,

    /// Only highlight the moves of the piece on this square.
    #[arg(short, long)]
    square: Option<Square>,

    /// Disable colored output.
    #[arg(long, default_value = "false")]
    no_color: bool,
}

/// Parses a piece like `Ke1` into its kind and square.
fn parse_piece(text: &str) -> anyhow::Result<(PieceKind, Square)> {
    let text = text.trim();
    let mut chars = text.chars();
    let Some(kind) = chars.next() else {
        bail!("Empty piece in list");
    };
    let kind = PieceKind::from_char(kind)?;
    let square = Square::from_uci(chars.as_str())
        .with_context(|| format!("Failed to parse square of piece {text:?}"))?;
    Ok((kind, square))
}

/// Parses a move like `d2d4` into its two squares.
fn parse_move(text: &str) -> anyhow::Result<(Square, Square)> {
    let text = text.trim();
    if text.len() != 4 || !text.is_ascii() {
        bail!("Invalid move: Got {text:?}. Expected something like \"d2d4\".");
    }
    Ok((Square::from_uci(&text[..2])?, Square::from_uci(&text[2..])?))
}

fn setup(args: &Cli) -> anyhow::Result<Board> {
    if args.white.is_empty() && args.black.is_empty() {
        return Ok(Board::standard());
    }

    let mut board = Board::new();
    for (team, pieces) in [(Team::White, &args.white), (Team::Black, &args.black)] {
        for text in pieces {
            let (kind, square) = parse_piece(text)?;
            board
                .put(square, kind, team)
                .with_context(|| format!("Failed to place {team} {kind} on {square}"))?;
        }
    }
    Ok(board)
}

/// Draws the board, marking `targets` and the squares of `checkers`.
fn draw(board: &Board, targets: Bitboard, checkers: Bitboard) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out += &format!("{}|", rank + 1);
        for file in 0..8 {
            let Some(square) = Square::new(file, rank) else {
                continue;
            };
            let c = board
                .piece_at(square)
                .map_or('.', |record| record.piece().char())
                .to_string();

            let cell = if checkers.contains(square) {
                c.red().bold()
            } else if targets.contains(square) {
                if board.has(square) {
                    c.yellow().bold()
                } else {
                    "*".green()
                }
            } else {
                c.normal()
            };
            out += &format!(" {cell}");
        }
        out.push('\n');
    }
    out += " +----------------\n   a b c d e f g h";
    out
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut board = setup(&args)?;
    for text in &args.moves {
        let (from, to) = parse_move(text)?;
        board
            .move_from(from, to)
            .with_context(|| format!("Failed to apply move {text:?}"))?;
    }

    let team = args.team;
    let moves = board.legal_moves(team)?;
    let attackers = board.attackers(team)?;
    let checkers: Bitboard = attackers.iter().map(|attacker| attacker.square).collect();

    let targets = match args.square {
        Some(square) => moves.get(&square).copied().unwrap_or_default(),
        None => moves.values().fold(Bitboard::EMPTY_BOARD, |all, &targets| all | targets),
    };

    println!("{}\n", draw(&board, targets, checkers));

    match attackers.len() {
        0 => println!("{team} is not in check"),
        1 => println!("{team} is in {}", "check".red()),
        _ => println!("{team} is in {}", "double check".red().bold()),
    }
    for pin in board.pins(team)? {
        let piece = board.piece_at(pin.square).map_or('?', |record| record.piece().char());
        println!("  {piece} on {} is pinned", pin.square);
    }

    let mut total = 0;
    for (from, targets) in &moves {
        if targets.is_empty() {
            continue;
        }
        let piece = board.piece_at(*from).map_or('?', |record| record.piece().char());
        let list: Vec<String> = targets.iter().map(|to| to.to_string()).collect();
        println!("  {piece}{from}: {}", list.join(" "));
        total += targets.population();
    }

    if total == 0 {
        let verdict = if attackers.is_empty() { "stalemate" } else { "checkmate" };
        println!("\n{team} has no legal moves: {}", verdict.bold());
    } else {
        println!("\n{total} legal moves for {team}");
    }

    Ok(())
}
