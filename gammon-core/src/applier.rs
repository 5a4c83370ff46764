//! Expansion of a roll into complete checker plays.
//!
//! # Doublets
//!
//! A doublet is played up to `doublet_uses` times. The search is a depth-first
//! walk where each follow-up move starts at or after the previous move's
//! origin. Within every group of sibling moves only the continuations using the
//! most dice survive, so a play that could use more dice is never shortened.
//!
//! # Non-doublets
//!
//! Both orders are searched:
//!
//! ```text
//! higher-first:  m1 ∈ list(0, high)   m2 ∈ list(m1.from, low)
//! lower-first:   m1 ∈ list(0, low)    m2 ∈ list(m1.from, high)
//! ```
//!
//! The lower-first pass can reach positions the higher-first pass already
//! produced. Two shapes are recognised and dropped, using marks registered by
//! the higher-first pass on its first move's origin:
//!
//! ```text
//! same point:    a→a+h, a→a+l        vs  a→a+l, a→a+h
//! same checker:  a→a+h→a+h+l         vs  a→a+l→a+l+h   (no hit on the way)
//! ```
//!
//! A lower-first pair bearing off twice always duplicates a higher-first pair.
//!
//! If no pair exists, a single move with the higher die is required when one
//! exists, else a single move with the lower die.

use crate::board::Board;
use crate::cursor::MoveCursor;
use crate::error::RulesError;
use crate::moves::{CheckerPlay, Move, Roll};

/// Lists the legal plays of a roll under a doublet usage budget.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RollApplier {
    doublet_uses: u8,
}

impl Default for RollApplier {
    fn default() -> Self {
        RollApplier::STANDARD
    }
}

impl RollApplier {
    /// Standard rules: a doublet is played four times.
    pub const STANDARD: RollApplier = RollApplier { doublet_uses: 4 };

    /// Create an applier playing doublets `doublet_uses` times.
    pub fn new(doublet_uses: u8) -> Result<RollApplier, RulesError> {
        if doublet_uses == 0 {
            return Err(RulesError::ZeroDoubletUses);
        }
        Ok(RollApplier { doublet_uses })
    }

    /// Doublets count as an ordinary roll of two equal dice.
    pub fn doublet_disabled() -> RollApplier {
        RollApplier { doublet_uses: 2 }
    }

    #[inline]
    pub fn doublet_uses(&self) -> u8 {
        self.doublet_uses
    }

    /// Every legal play for `roll` on `board`.
    ///
    /// Never empty: a roll with no legal move yields the single empty play.
    /// No two returned plays lead to the same position.
    pub fn legal_plays(&self, board: &Board, roll: Roll) -> Vec<CheckerPlay> {
        let cursor = MoveCursor::new(*board);
        self.legal_plays_from(&cursor, roll)
    }

    /// Same as [`legal_plays`](Self::legal_plays), over a cursor with its own generator.
    pub fn legal_plays_from(&self, cursor: &MoveCursor, roll: Roll) -> Vec<CheckerPlay> {
        if roll.is_doublet() {
            self.doublet_plays(cursor, roll)
        } else {
            non_doublet_plays(cursor, roll)
        }
    }

    fn doublet_plays(&self, cursor: &MoveCursor, roll: Roll) -> Vec<CheckerPlay> {
        let lines = deepest_lines(cursor, 0, roll.higher(), self.doublet_uses);
        if lines.is_empty() {
            return vec![CheckerPlay::empty(roll)];
        }
        lines
            .into_iter()
            .map(|moves| CheckerPlay::new(roll, moves))
            .collect()
    }
}

/// Longest move sequences for repeated `pips`, each starting at or after `floor`.
///
/// Empty when no move is possible; otherwise every returned line has the same length.
fn deepest_lines(cursor: &MoveCursor, floor: usize, pips: u8, depth: u8) -> Vec<Vec<Move>> {
    let moves = cursor.list(floor, pips);
    if depth <= 1 {
        return moves.into_iter().map(|mov| vec![mov]).collect();
    }

    let mut best = 0;
    let mut lines = Vec::new();
    for mov in moves {
        let tails = deepest_lines(&cursor.advance(mov), mov.from() as usize, pips, depth - 1);
        let len = tails.first().map_or(0, Vec::len) + 1;
        if len < best {
            continue;
        }
        if len > best {
            best = len;
            lines.clear();
        }
        if tails.is_empty() {
            lines.push(vec![mov]);
        } else {
            lines.extend(tails.into_iter().map(|tail| {
                let mut line = Vec::with_capacity(tail.len() + 1);
                line.push(mov);
                line.extend(tail);
                line
            }));
        }
    }
    lines
}

fn non_doublet_plays(cursor: &MoveCursor, roll: Roll) -> Vec<CheckerPlay> {
    let (high, low) = (roll.higher(), roll.lower());
    let high_moves = cursor.list(0, high);
    let low_moves = cursor.list(0, low);

    let higher_first = follow_ups(cursor, &high_moves, low);
    let marks = DuplicateMarks::register(&higher_first);
    let lower_first: Vec<[Move; 2]> = follow_ups(cursor, &low_moves, high)
        .into_iter()
        .filter(|pair| marks.keeps(pair))
        .collect();

    if !higher_first.is_empty() || !lower_first.is_empty() {
        return higher_first
            .into_iter()
            .chain(lower_first)
            .map(|pair| CheckerPlay::new(roll, pair.to_vec()))
            .collect();
    }

    // Only one die can be played: the higher one if possible.
    let singles = if high_moves.is_empty() {
        low_moves
    } else {
        high_moves
    };
    if singles.is_empty() {
        return vec![CheckerPlay::empty(roll)];
    }
    singles
        .into_iter()
        .map(|mov| CheckerPlay::new(roll, vec![mov]))
        .collect()
}

/// Every `[first, second]` where `second` uses `pips` after `first`, from `first`'s origin on.
fn follow_ups(cursor: &MoveCursor, firsts: &[Move], pips: u8) -> Vec<[Move; 2]> {
    let mut pairs = Vec::new();
    for &first in firsts {
        let next = cursor.advance(first);
        pairs.extend(
            next.list(first.from() as usize, pips)
                .into_iter()
                .map(|second| [first, second]),
        );
    }
    pairs
}

/// Origins whose lower-first pairs repeat a higher-first result.
///
/// Bit `i` is set when a higher-first pair starting at index `i` has the shape.
#[derive(Clone, Copy, Default, Debug)]
struct DuplicateMarks {
    same_point: u32,
    same_checker: u32,
}

impl DuplicateMarks {
    fn register(higher_first: &[[Move; 2]]) -> DuplicateMarks {
        higher_first
            .iter()
            .fold(DuplicateMarks::default(), |mut marks, pair| {
                let bit = 1u32 << pair[0].from();
                if is_same_point(pair) {
                    marks.same_point |= bit;
                }
                if is_same_checker(pair) {
                    marks.same_checker |= bit;
                }
                marks
            })
    }

    fn keeps(&self, pair: &[Move; 2]) -> bool {
        let bit = 1u32 << pair[0].from();
        if pair[0].is_bear_off() && pair[1].is_bear_off() {
            return false;
        }
        if self.same_point & bit != 0 && is_same_point(pair) {
            return false;
        }
        !(self.same_checker & bit != 0 && is_same_checker(pair))
    }
}

/// Both moves leave the same point.
#[inline]
fn is_same_point(pair: &[Move; 2]) -> bool {
    pair[1].from() == pair[0].from()
}

/// The second move continues with the checker the first one moved, which did not hit.
#[inline]
fn is_same_checker(pair: &[Move; 2]) -> bool {
    pair[0].to() == Some(pair[1].from()) && !pair[0].is_hit()
}
