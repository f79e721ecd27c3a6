/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use super::{PieceId, Square, Team};

/// Misuse of the [`Board`](crate::Board) API.
///
/// None of these are recovered internally; they are returned to the immediate caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Tried to place a piece on a square that already holds one.
    #[error("Square {0} is already occupied. Use a move to replace a piece")]
    OccupiedSquare(Square),

    /// Tried to remove a piece from an empty square.
    #[error("Square {0} is empty")]
    EmptySquare(Square),

    /// An operation needed the King of a team that has none on the board.
    #[error("No {0} King has been placed")]
    MissingKing(Team),

    /// Tried to place a second King for the same team.
    #[error("A {0} King is already on the board")]
    DuplicateKing(Team),

    /// The piece handle does not refer to a live piece on this board.
    #[error("Piece {0} is not on the board")]
    UnknownPiece(PieceId),

    /// A coordinate could not be converted to a square.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl From<anyhow::Error> for BoardError {
    fn from(err: anyhow::Error) -> Self {
        Self::InvalidCoordinate(err.to_string())
    }
}

/// Result alias for [`Board`](crate::Board) operations.
pub type Result<T> = std::result::Result<T, BoardError>;
