//! Move, roll and checker-play value types.
//!
//! Positions are absolute board indices in the mover's travel order (see
//! [`crate::board`]). `Display` prints them ascending (`13/14*`, `BAR/3`,
//! `22/OFF`); the `*_descending` formatters print the conventional
//! `bear_off - index` numbering (`12/11*`, `BAR/22`, `3/OFF`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::BAR;
use crate::error::RulesError;

/// A single checker movement.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Move {
    /// Move a checker forward, optionally hitting a lone opposing checker.
    Step { from: u8, to: u8, hit: bool },
    /// Remove a checker from the board.
    BearOff { from: u8 },
}

impl Move {
    /// Create a forward move. `from` must be strictly less than `to`.
    #[inline]
    pub fn step(from: u8, to: u8, hit: bool) -> Move {
        debug_assert!(from < to, "step {from}/{to} does not move forward");
        Move::Step { from, to, hit }
    }

    #[inline]
    pub fn bear_off(from: u8) -> Move {
        Move::BearOff { from }
    }

    /// Origin index.
    #[inline]
    pub fn from(self) -> u8 {
        match self {
            Move::Step { from, .. } | Move::BearOff { from } => from,
        }
    }

    /// Destination index, `None` for a bear-off.
    #[inline]
    pub fn to(self) -> Option<u8> {
        match self {
            Move::Step { to, .. } => Some(to),
            Move::BearOff { .. } => None,
        }
    }

    #[inline]
    pub fn is_hit(self) -> bool {
        matches!(self, Move::Step { hit: true, .. })
    }

    #[inline]
    pub fn is_bear_off(self) -> bool {
        matches!(self, Move::BearOff { .. })
    }

    /// Format with points numbered from the mover's home outward.
    pub fn to_descending_string(self, bear_off: usize) -> String {
        let flip = |pos: u8| bear_off as i32 - pos as i32;
        match self {
            Move::Step { from, to, hit } => {
                let star = if hit { "*" } else { "" };
                if from as usize == BAR {
                    format!("BAR/{}{}", flip(to), star)
                } else {
                    format!("{}/{}{}", flip(from), flip(to), star)
                }
            }
            Move::BearOff { from } => format!("{}/OFF", flip(from)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Step { from, to, hit } => {
                if from as usize == BAR {
                    write!(f, "BAR/{to}")?;
                } else {
                    write!(f, "{from}/{to}")?;
                }
                if hit {
                    f.write_str("*")?;
                }
                Ok(())
            }
            Move::BearOff { from } => write!(f, "{from}/OFF"),
        }
    }
}

/// Sides on each die, for every variant.
pub const DIE_FACES: u8 = 6;

/// An unordered pair of die faces, stored as `(higher, lower)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Roll {
    higher: u8,
    lower: u8,
}

impl Roll {
    /// Create a roll from two faces in either order.
    pub fn new(a: u8, b: u8) -> Roll {
        debug_assert!(a >= 1 && b >= 1, "die faces start at 1");
        Roll {
            higher: a.max(b),
            lower: a.min(b),
        }
    }

    /// Create a roll from untrusted faces, each of which must be in `1..=DIE_FACES`.
    pub fn try_new(a: u8, b: u8) -> Result<Roll, RulesError> {
        match [a, b].into_iter().find(|face| !(1..=DIE_FACES).contains(face)) {
            Some(face) => Err(RulesError::InvalidDie(face)),
            None => Ok(Roll::new(a, b)),
        }
    }

    #[inline]
    pub fn higher(self) -> u8 {
        self.higher
    }

    #[inline]
    pub fn lower(self) -> u8 {
        self.lower
    }

    #[inline]
    pub fn is_doublet(self) -> bool {
        self.higher == self.lower
    }

    /// Number of ordered die outcomes producing this roll.
    #[inline]
    pub fn weight(self) -> u32 {
        if self.is_doublet() {
            1
        } else {
            2
        }
    }

    /// Every distinct roll of two dice with `faces` sides, ordered by (higher, lower).
    pub fn all(faces: u8) -> Vec<Roll> {
        (1..=faces)
            .flat_map(|h| (1..=h).map(move |l| Roll::new(h, l)))
            .collect()
    }

    /// The rolls allowed on the first turn (no doublets).
    pub fn openings(faces: u8) -> Vec<Roll> {
        Roll::all(faces)
            .into_iter()
            .filter(|r| !r.is_doublet())
            .collect()
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.higher, self.lower)
    }
}

/// One turn's moves for a roll. An empty move list means the roll could not be played.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CheckerPlay {
    roll: Roll,
    moves: Vec<Move>,
}

impl CheckerPlay {
    pub fn new(roll: Roll, moves: Vec<Move>) -> CheckerPlay {
        CheckerPlay { roll, moves }
    }

    /// The play for a roll with no legal move.
    pub fn empty(roll: Roll) -> CheckerPlay {
        CheckerPlay {
            roll,
            moves: Vec::new(),
        }
    }

    #[inline]
    pub fn roll(&self) -> Roll {
        self.roll
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Format as `"<roll>: <moves>"` with descending point numbers.
    pub fn to_descending_string(&self, bear_off: usize) -> String {
        let mut out = format!("{}:", self.roll);
        for mov in &self.moves {
            out.push(' ');
            out.push_str(&mov.to_descending_string(bear_off));
        }
        out
    }
}

impl fmt::Display for CheckerPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.roll)?;
        for mov in &self.moves {
            write!(f, " {mov}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_checks_faces() {
        assert_eq!(Roll::try_new(2, 6), Ok(Roll::new(6, 2)));
        assert_eq!(Roll::try_new(0, 0), Err(RulesError::InvalidDie(0)));
        assert_eq!(Roll::try_new(3, 7), Err(RulesError::InvalidDie(7)));
        assert_eq!(Roll::all(DIE_FACES).len(), 21);
    }

    #[test]
    fn test_move_accessors() {
        let step = Move::step(13, 15, true);
        assert_eq!(step.from(), 13);
        assert_eq!(step.to(), Some(15));
        assert!(step.is_hit());
        assert!(!step.is_bear_off());

        let off = Move::bear_off(22);
        assert_eq!(off.from(), 22);
        assert_eq!(off.to(), None);
        assert!(!off.is_hit());
        assert!(off.is_bear_off());
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::step(13, 14, true).to_string(), "13/14*");
        assert_eq!(Move::step(0, 3, false).to_string(), "BAR/3");
        assert_eq!(Move::bear_off(22).to_string(), "22/OFF");

        assert_eq!(Move::step(13, 14, true).to_descending_string(25), "12/11*");
        assert_eq!(Move::step(0, 3, false).to_descending_string(25), "BAR/22");
        assert_eq!(Move::bear_off(22).to_descending_string(25), "3/OFF");
    }

    #[test]
    fn test_roll_normalizes_order() {
        assert_eq!(Roll::new(1, 2), Roll::new(2, 1));
        let roll = Roll::new(3, 5);
        assert_eq!(roll.higher(), 5);
        assert_eq!(roll.lower(), 3);
        assert_eq!(roll.to_string(), "53");
        assert!(!roll.is_doublet());
        assert!(Roll::new(4, 4).is_doublet());
    }

    #[test]
    fn test_roll_listing() {
        let all = Roll::all(6);
        assert_eq!(all.len(), 21);
        assert_eq!(all.first(), Some(&Roll::new(1, 1)));
        assert_eq!(all.last(), Some(&Roll::new(6, 6)));
        assert!(all.windows(2).all(|w| w[0] < w[1]));

        let weights: u32 = all.iter().map(|r| r.weight()).sum();
        assert_eq!(weights, 36);

        let openings = Roll::openings(6);
        assert_eq!(openings.len(), 15);
        assert!(openings.iter().all(|r| r.weight() == 2));

        assert_eq!(Roll::all(3).len(), 6);
        assert_eq!(Roll::openings(3).len(), 3);
    }

    #[test]
    fn test_checker_play_display() {
        let play = CheckerPlay::new(
            Roll::new(1, 2),
            vec![Move::step(13, 14, false), Move::step(15, 17, false)],
        );
        assert_eq!(play.to_string(), "21: 13/14 15/17");
        assert_eq!(play.to_descending_string(25), "21: 12/11 10/8");
        assert_eq!(play.len(), 2);

        let dance = CheckerPlay::empty(Roll::new(5, 3));
        assert!(dance.is_empty());
        assert_eq!(dance.to_string(), "53:");
    }

    #[test]
    fn test_serde_roundtrip() {
        let play = CheckerPlay::new(
            Roll::new(6, 6),
            vec![Move::step(0, 6, true), Move::bear_off(24)],
        );
        let json = serde_json::to_string(&play).unwrap();
        let back: CheckerPlay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, play);
    }
}
