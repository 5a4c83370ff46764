//! Text notation for checker plays.
//!
//! ```text
//! <d1><d2>: <from>/<to>[*] <from>/<to>[*] ...
//! "21: 13/14 15/17"     ascending indices
//! "21: 12/11 10/8"      descending point numbers, same play
//! "53: BAR/22* 6/OFF"   bar entry and bear-off
//! "53:"                 no legal move
//! ```
//!
//! `BAR` and `OFF` are case-insensitive and `*` marks a hit. Points written
//! in the descending convention are translated with the home-board size `h`:
//!
//! * `BAR/<to>` with `to > h` means `to = bear_off - to`;
//! * `<from>/OFF` with `from < bear_off - h` means `from = bear_off - from`;
//! * any other `<from>/<to>` with `from > to` mirrors both ends.

use std::str::FromStr;

use crate::board::{Geometry, BAR};
use crate::error::NotationError;
use crate::moves::{CheckerPlay, Move, Roll};

/// Parse a checker play for a board of the given geometry.
pub fn parse_play(text: &str, geometry: &Geometry) -> Result<CheckerPlay, NotationError> {
    let (roll, moves) = text
        .split_once(':')
        .ok_or_else(|| NotationError::MissingSeparator(text.to_string()))?;
    let roll = parse_roll(roll.trim())?;
    let moves = moves
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| parse_move(token, geometry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CheckerPlay::new(roll, moves))
}

fn parse_roll(text: &str) -> Result<Roll, NotationError> {
    let invalid = || NotationError::InvalidRoll(text.to_string());
    let digits: Vec<u8> = text
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(invalid)?;
    match digits.as_slice() {
        &[a, b] => Roll::try_new(a, b).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn parse_move(token: &str, geometry: &Geometry) -> Result<Move, NotationError> {
    let invalid = || NotationError::InvalidMove(token.to_string());
    let (body, hit) = match token.strip_suffix('*') {
        Some(body) => (body, true),
        None => (token, false),
    };
    let (from, to) = body.split_once('/').ok_or_else(invalid)?;

    let from = if from.eq_ignore_ascii_case("bar") {
        BAR
    } else {
        from.parse::<usize>().map_err(|_| invalid())?
    };
    let to = if to.eq_ignore_ascii_case("off") {
        None
    } else {
        Some(to.parse::<usize>().map_err(|_| invalid())?)
    };

    let bear_off = geometry.bear_off();
    let home = geometry.home_size();
    let mirror = |pos: usize| {
        bear_off
            .checked_sub(pos)
            .ok_or_else(|| NotationError::OutOfRange(token.to_string()))
    };

    match to {
        None => {
            if hit {
                return Err(invalid());
            }
            let from = if from < bear_off - home {
                mirror(from)?
            } else {
                from
            };
            if from == BAR || from >= bear_off {
                return Err(NotationError::OutOfRange(token.to_string()));
            }
            Ok(Move::bear_off(from as u8))
        }
        Some(to) => {
            let (from, to) = if from == BAR && to > home {
                (from, mirror(to)?)
            } else if from > to {
                (mirror(from)?, mirror(to)?)
            } else {
                (from, to)
            };
            if from >= bear_off || to >= bear_off {
                return Err(NotationError::OutOfRange(token.to_string()));
            }
            if from >= to {
                return Err(NotationError::BackwardMove(token.to_string()));
            }
            Ok(Move::step(from as u8, to as u8, hit))
        }
    }
}

/// Parses against the standard board.
impl FromStr for CheckerPlay {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_play(s, &Geometry::STANDARD)
    }
}
