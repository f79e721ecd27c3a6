/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use chessrules_types::*;

/// Danger zones, check detection, and enumeration of the pieces checking a King.
mod attacks;
/// The board itself: a piece arena, a grid, a square map, Kings and en passant state.
mod board;
/// Errors returned by board operations.
mod error;
/// Pin detection and the legal move computation.
mod legality;
/// Utility function for performance testing.
mod perft;
/// Per-kind movement geometry, independent of any legality rules.
mod pieces;

pub use attacks::*;
pub use board::*;
pub use error::*;
pub use legality::*;
pub use perft::*;
pub use pieces::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::attacks::*;
    pub use crate::board::*;
    pub use crate::error::*;
    pub use crate::legality::*;
    pub use crate::perft::*;
    pub use crate::pieces::*;
    pub use chessrules_types::*;
}
