//! Perspective-relative checker-count board.
//!
//! # Layout
//!
//! ```text
//! index 0              own bar (hit checkers waiting to enter)
//! 1 ..= bear_off - 1   points in travel order; the home board starts at `inner`
//! bear_off             opponent's bar (never positive), also the bear-off reference
//! ```
//!
//! Own checkers are positive counts, opponent checkers negative. The board is
//! always stored from the point of view of the player about to move;
//! [`Board::revert`] flips it for the other side.
//!
//! Standard variant (`bear_off = 25`, `inner = 19`):
//!
//! ```text
//!   0 | 1  2  3  4  5  6 | 7  8  9 10 11 12 | 13 14 15 16 17 18 | 19 20 21 22 23 24 | 25
//! bar |  opponent home   |                  |                   |    own home       | opp bar
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, RulesError};
use crate::moves::{CheckerPlay, Move};

/// Largest supported slot count (standard board: bar + 24 points + opponent bar).
pub const MAX_SLOTS: usize = 26;

/// Index of the mover's bar.
pub const BAR: usize = 0;

/// The constants that parametrize a board variant.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct Geometry {
    bear_off: u8,
    inner: u8,
    checkers: u8,
}

#[derive(Deserialize)]
struct RawGeometry {
    bear_off: u8,
    inner: u8,
    checkers: u8,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = BoardError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        Geometry::new(raw.bear_off, raw.inner, raw.checkers)
    }
}

impl Geometry {
    /// 24 points, 15 checkers per side.
    pub const STANDARD: Geometry = Geometry {
        bear_off: 25,
        inner: 19,
        checkers: 15,
    };

    /// 16 points, 10 checkers per side.
    pub const HALF: Geometry = Geometry {
        bear_off: 17,
        inner: 13,
        checkers: 10,
    };

    /// 12 points, 8 checkers per side.
    pub const MINI: Geometry = Geometry {
        bear_off: 13,
        inner: 10,
        checkers: 8,
    };

    /// Create a geometry, rejecting inconsistent bear-off / inner / checker triples.
    pub fn new(bear_off: u8, inner: u8, checkers: u8) -> Result<Geometry, BoardError> {
        let slots = bear_off as usize + 1;
        if slots > MAX_SLOTS {
            return Err(BoardError::TooManySlots {
                bear_off: bear_off as usize,
                slots,
                max: MAX_SLOTS,
            });
        }
        if inner == 0 || inner >= bear_off {
            return Err(BoardError::InnerOutOfRange {
                inner: inner as usize,
                bear_off: bear_off as usize,
            });
        }
        if checkers == 0 || checkers > i8::MAX as u8 {
            return Err(BoardError::CheckerLimit(checkers));
        }
        Ok(Geometry {
            bear_off,
            inner,
            checkers,
        })
    }

    /// First index past the playable points.
    #[inline]
    pub const fn bear_off(self) -> usize {
        self.bear_off as usize
    }

    /// First index of the home board.
    #[inline]
    pub const fn inner(self) -> usize {
        self.inner as usize
    }

    /// Checkers per side.
    #[inline]
    pub const fn checkers(self) -> u8 {
        self.checkers
    }

    /// Number of slots in the flat layout (`bear_off + 1`).
    #[inline]
    pub const fn slots(self) -> usize {
        self.bear_off as usize + 1
    }

    /// Number of points in the home board.
    #[inline]
    pub const fn home_size(self) -> usize {
        (self.bear_off - self.inner) as usize
    }
}

/// Named board variants with their starting arrangements.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Standard,
    Half,
    Mini,
}

#[rustfmt::skip]
const STANDARD_LAYOUT: [i8; 26] = [
    0,
    2, 0, 0, 0, 0, -5,
    0, -3, 0, 0, 0, 5,
    -5, 0, 0, 0, 3, 0,
    5, 0, 0, 0, 0, -2,
    0,
];

#[rustfmt::skip]
const HALF_LAYOUT: [i8; 18] = [
    0,
    2, 0, 0, -3,
    0, -2, 0, 3,
    -3, 0, 2, 0,
    3, 0, 0, -2,
    0,
];

#[rustfmt::skip]
const MINI_LAYOUT: [i8; 14] = [
    0,
    2, 0, -3,
    0, 0, 3,
    -3, 0, 0,
    3, 0, -2,
    0,
];

impl Variant {
    pub fn geometry(self) -> Geometry {
        match self {
            Variant::Standard => Geometry::STANDARD,
            Variant::Half => Geometry::HALF,
            Variant::Mini => Geometry::MINI,
        }
    }

    /// Starting layout from the first mover's perspective.
    pub fn initial_arrangement(self) -> &'static [i8] {
        match self {
            Variant::Standard => &STANDARD_LAYOUT,
            Variant::Half => &HALF_LAYOUT,
            Variant::Mini => &MINI_LAYOUT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Half => "half",
            Variant::Mini => "mini",
        }
    }

    /// Iterate over all variants.
    pub fn all() -> impl Iterator<Item = Variant> {
        [Variant::Standard, Variant::Half, Variant::Mini].into_iter()
    }
}

impl FromStr for Variant {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::all()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RulesError::UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable checker-count board seen from the player to move.
///
/// Slots past `geometry.slots()` are always zero, so derived equality and
/// hashing compare positions exactly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    points: [i8; MAX_SLOTS],
    geometry: Geometry,
}

/// Serialized form: geometry plus the flat layout.
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    geometry: Geometry,
    points: Vec<i8>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Board::new(repr.geometry, &repr.points)
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            geometry: board.geometry,
            points: board.points().to_vec(),
        }
    }
}

impl Board {
    /// Create a board from a flat layout (see module docs).
    pub fn new(geometry: Geometry, layout: &[i8]) -> Result<Board, BoardError> {
        if layout.len() != geometry.slots() {
            return Err(BoardError::SlotCount {
                expected: geometry.slots(),
                actual: layout.len(),
            });
        }
        if layout[BAR] < 0 {
            return Err(BoardError::MisplacedChecker { index: BAR });
        }
        if layout[geometry.bear_off()] > 0 {
            return Err(BoardError::MisplacedChecker {
                index: geometry.bear_off(),
            });
        }

        let limit = geometry.checkers() as usize;
        let own = count_side(layout, |c| c > 0);
        if own > limit {
            return Err(BoardError::TooManyCheckers {
                side: "own side",
                count: own,
                limit,
            });
        }
        let opponent = count_side(layout, |c| c < 0);
        if opponent > limit {
            return Err(BoardError::TooManyCheckers {
                side: "opponent",
                count: opponent,
                limit,
            });
        }

        Ok(Board::from_layout(geometry, layout))
    }

    /// The starting position of a variant, first mover to play.
    pub fn starting(variant: Variant) -> Board {
        Board::from_layout(variant.geometry(), variant.initial_arrangement())
    }

    fn from_layout(geometry: Geometry, layout: &[i8]) -> Board {
        let mut points = [0i8; MAX_SLOTS];
        points[..layout.len()].copy_from_slice(layout);
        Board { points, geometry }
    }

    /// Signed checker count at a slot (positive = own, negative = opponent).
    #[inline]
    pub fn point(&self, pos: usize) -> i8 {
        self.points[pos]
    }

    /// Opponent checker count at a playable point.
    #[inline]
    pub fn opponent_at(&self, pos: usize) -> i8 {
        -self.points[pos]
    }

    #[inline]
    pub fn bear_off_index(&self) -> usize {
        self.geometry.bear_off()
    }

    #[inline]
    pub fn inner_index(&self) -> usize {
        self.geometry.inner()
    }

    #[inline]
    pub fn initial_checkers(&self) -> u8 {
        self.geometry.checkers()
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The flat layout, `bear_off + 1` slots long.
    #[inline]
    pub fn points(&self) -> &[i8] {
        &self.points[..self.geometry.slots()]
    }

    /// Whether the mover has checkers waiting on the bar.
    #[inline]
    pub fn has_on_bar(&self) -> bool {
        self.points[BAR] > 0
    }

    /// True iff no own checker sits before the home board (bar included).
    pub fn may_bear_off(&self) -> bool {
        self.points[..self.inner_index()].iter().all(|&c| c <= 0)
    }

    /// Board after one move. The move is trusted to be legal.
    pub fn apply(&self, mov: Move) -> Board {
        let mut next = *self;
        match mov {
            Move::Step { from, to, hit } => {
                let (from, to) = (from as usize, to as usize);
                debug_assert!(next.points[from] > 0, "no own checker on {from}");
                next.points[from] -= 1;
                if hit {
                    debug_assert_eq!(next.points[to], -1, "hit on {to} without a blot");
                    next.points[to] += 1;
                    next.points[self.bear_off_index()] -= 1;
                }
                next.points[to] += 1;
            }
            Move::BearOff { from } => {
                debug_assert!(next.points[from as usize] > 0, "no own checker on {from}");
                next.points[from as usize] -= 1;
            }
        }
        next
    }

    /// Board after every move of a play, in order.
    pub fn apply_play(&self, play: &CheckerPlay) -> Board {
        play.moves().iter().fold(*self, |board, &mov| board.apply(mov))
    }

    /// The same position seen from the opponent's side.
    pub fn revert(&self) -> Board {
        let len = self.geometry.slots();
        let mut points = [0i8; MAX_SLOTS];
        for (i, slot) in points[..len].iter_mut().enumerate() {
            *slot = -self.points[len - 1 - i];
        }
        Board {
            points,
            geometry: self.geometry,
        }
    }

    /// Own checkers on the board, bar included.
    pub fn own_checkers(&self) -> usize {
        count_side(self.points(), |c| c > 0)
    }

    /// Opponent checkers on the board, their bar included.
    pub fn opponent_checkers(&self) -> usize {
        count_side(self.points(), |c| c < 0)
    }

    pub fn own_borne_off(&self) -> usize {
        self.initial_checkers() as usize - self.own_checkers()
    }

    pub fn opponent_borne_off(&self) -> usize {
        self.initial_checkers() as usize - self.opponent_checkers()
    }

    /// Total pips the mover needs to bear everything off.
    pub fn pip_count(&self) -> u32 {
        let bear_off = self.bear_off_index();
        self.points()
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| c as u32 * (bear_off - i) as u32)
            .sum()
    }
}

fn count_side(layout: &[i8], side: impl Fn(i8) -> bool) -> usize {
    layout
        .iter()
        .filter(|&&c| side(c))
        .map(|&c| c.unsigned_abs() as usize)
        .sum()
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("geometry", &self.geometry)
            .field("points", &self.points())
            .finish()
    }
}
