/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

/// A set of squares, stored as a 64-bit mask.
mod bitboard;
/// Enums for teams and piece kinds, and a struct combining the two.
mod piece;
/// Squares on a chessboard, and conversions between coordinate systems.
mod square;

pub use bitboard::*;
pub use piece::*;
pub use square::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::bitboard::*;
    pub use crate::piece::*;
    pub use crate::square::*;
}
