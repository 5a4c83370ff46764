//! Legal checker-play enumeration for backgammon-family games.
//!
//! # Board Layout
//!
//! ```text
//! index:  0     1 .. inner-1       inner .. bear_off-1     bear_off
//!         bar   outer points       home board              opponent bar
//! ```
//!
//! Counts are signed from the point of view of the player to move: own
//! checkers positive, opponent checkers negative. After a turn the board is
//! [`revert`](Board::revert)ed for the other player.
//!
//! # Enumeration
//!
//! ```text
//! RollApplier ──► MoveCursor ──► single_die_moves ──► Board
//!   (plays)        (board + generator)   (one die)       (queries)
//! ```
//!
//! [`list_legal_plays`] returns every legal play for a roll under standard
//! rules, never two plays leading to the same position, and the single empty
//! play when the roll cannot be used.

pub mod applier;
pub mod board;
pub mod config;
pub mod cursor;
pub mod error;
pub mod movegen;
pub mod moves;
pub mod notation;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use applier::RollApplier;
pub use board::{Board, Geometry, Variant, BAR, MAX_SLOTS};
pub use config::Rules;
pub use cursor::{MoveCursor, MoveGenFn};
pub use error::{BoardError, NotationError, RulesError};
pub use movegen::{movable_points, single_die_moves};
pub use moves::{CheckerPlay, Move, Roll, DIE_FACES};
pub use notation::parse_play;

/// Every legal play for `roll` on `board` under standard rules.
pub fn list_legal_plays(board: &Board, roll: Roll) -> Vec<CheckerPlay> {
    RollApplier::STANDARD.legal_plays(board, roll)
}
