//! Single-die move enumeration.
//!
//! Every function takes a `floor`: the smallest origin index a move may start
//! from. Follow-up moves inside one turn are generated with the previous
//! move's origin as the floor, which keeps each play's origins non-decreasing
//! and stops the same set of moves from being listed in several orders.
//!
//! Bar priority lives entirely in [`movable_points`]: while the mover has a
//! checker on the bar, the bar is the only movable point.

use crate::board::{Board, BAR};
use crate::moves::Move;

/// Indices holding a movable own checker, ascending.
///
/// Only the bar while it is occupied; otherwise every own point at or after `floor`.
pub fn movable_points(board: &Board, floor: usize) -> impl Iterator<Item = usize> + '_ {
    let on_bar = board.has_on_bar();
    let range = if on_bar {
        BAR..BAR + 1
    } else {
        floor.max(BAR + 1)..board.bear_off_index()
    };
    range.filter(move |&pos| board.point(pos) > 0)
}

/// All legal moves for one die of `pips`, starting at or after `floor`.
pub fn single_die_moves(board: &Board, floor: usize, pips: u8) -> Vec<Move> {
    if board.may_bear_off() {
        bearing_off_moves(board, floor, pips)
    } else {
        normal_moves(board, floor, pips)
    }
}

/// Moves that stay on the board.
fn normal_moves(board: &Board, floor: usize, pips: u8) -> Vec<Move> {
    let bear_off = board.bear_off_index();
    let pips = pips as usize;

    movable_points(board, floor)
        .take_while(|&from| from + pips < bear_off)
        .filter_map(|from| {
            let to = from + pips;
            match board.opponent_at(to) {
                n if n >= 2 => None,
                n => Some(Move::step(from as u8, to as u8, n == 1)),
            }
        })
        .collect()
}

fn bearing_off_moves(board: &Board, floor: usize, pips: u8) -> Vec<Move> {
    let bear_off = board.bear_off_index();
    let Some(rearmost) = movable_points(board, BAR).next() else {
        return Vec::new();
    };

    // A die larger than the rearmost checker's distance may only bear that checker off.
    if rearmost + pips as usize > bear_off {
        return if rearmost >= floor {
            vec![Move::bear_off(rearmost as u8)]
        } else {
            Vec::new()
        };
    }

    let mut moves = normal_moves(board, floor, pips);
    let exact = bear_off - pips as usize;
    if exact >= floor && board.point(exact) > 0 {
        moves.push(Move::bear_off(exact as u8));
    }
    moves
}
