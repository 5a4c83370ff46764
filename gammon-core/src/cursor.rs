//! Persistent cursor over a board and a move generator.

use std::fmt;

use crate::board::Board;
use crate::movegen::single_die_moves;
use crate::moves::Move;

/// Signature of a single-die move generator: `(board, floor, pips) -> moves`.
pub type MoveGenFn = fn(&Board, usize, u8) -> Vec<Move>;

/// A board paired with the generator used to list its moves.
///
/// Advancing returns a new cursor; the parent stays usable for sibling branches.
#[derive(Clone, Copy)]
pub struct MoveCursor {
    board: Board,
    generate: MoveGenFn,
}

impl MoveCursor {
    /// Cursor using the standard single-die rules.
    pub fn new(board: Board) -> MoveCursor {
        MoveCursor::with_generator(board, single_die_moves)
    }

    pub fn with_generator(board: Board, generate: MoveGenFn) -> MoveCursor {
        MoveCursor { board, generate }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves for one die of `pips` with origins at or after `floor`.
    #[inline]
    pub fn list(&self, floor: usize, pips: u8) -> Vec<Move> {
        (self.generate)(&self.board, floor, pips)
    }

    /// Cursor over the board after `mov`, sharing this cursor's generator.
    #[inline]
    pub fn advance(&self, mov: Move) -> MoveCursor {
        MoveCursor {
            board: self.board.apply(mov),
            generate: self.generate,
        }
    }
}

impl fmt::Debug for MoveCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveCursor")
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}
