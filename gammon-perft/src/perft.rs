//! Play-tree walk: every roll, every legal play, to a fixed ply depth.
//!
//! - Transpositions are NOT compressed (same position via different paths = distinct nodes)
//! - A play bearing off the mover's last checker ends the game (terminal, not expanded)
//! - Distinct positions per ply are tracked by xxh64 of the flat layout

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use gammon_core::{Board, CheckerPlay, Roll, RollApplier, Rules, RulesError, DIE_FACES, MAX_SLOTS};
use xxhash_rust::xxh64::xxh64;

/// Expansions between progress callbacks.
const PROGRESS_EVERY: u64 = 1 << 12;

/// Counters for one ply of the tree.
#[derive(Debug, Default)]
pub struct PlyStats {
    /// Positions reached at this ply (one per play)
    pub nodes: u64,
    /// Nodes reached through an empty play
    pub dances: u64,
    /// Nodes where the mover bore off the last checker
    pub terminals: u64,
    positions: HashSet<u64>,
}

impl PlyStats {
    /// Number of different non-terminal positions seen at this ply.
    pub fn distinct(&self) -> usize {
        self.positions.len()
    }
}

/// Stack frame for iterative DFS.
struct Frame {
    /// Position at this node, seen from the player to move
    board: Board,
    ply: usize,
    /// Index of the next roll to expand
    roll_idx: usize,
    /// Legal plays of the roll being expanded
    plays: Vec<CheckerPlay>,
    /// Index of the next play to explore
    play_idx: usize,
}

impl Frame {
    fn new(board: Board, ply: usize) -> Frame {
        Frame {
            board,
            ply,
            roll_idx: 0,
            plays: Vec::new(),
            play_idx: 0,
        }
    }
}

/// Depth-limited play-tree counter.
pub struct Perft {
    applier: RollApplier,
    rolls: Vec<Roll>,
    depth: usize,
    plies: Vec<PlyStats>,
    /// Largest stack seen
    pub max_stack: usize,
}

impl Perft {
    /// Counter for `depth` plies under `rules`. Every variant rolls six-sided dice.
    pub fn new(rules: &Rules, depth: usize) -> Result<Perft, RulesError> {
        Ok(Perft {
            applier: rules.applier()?,
            rolls: Roll::all(DIE_FACES),
            depth,
            plies: (0..=depth).map(|_| PlyStats::default()).collect(),
            max_stack: 0,
        })
    }

    pub fn plies(&self) -> &[PlyStats] {
        &self.plies
    }

    /// Total nodes over all plies.
    pub fn total_nodes(&self) -> u64 {
        self.plies.iter().map(|p| p.nodes).sum()
    }

    /// Walk the tree from `root`. Returns false if `running` was cleared first.
    ///
    /// `on_progress` is called periodically with the counters and the stack depth.
    pub fn run(
        &mut self,
        root: Board,
        running: &AtomicBool,
        mut on_progress: impl FnMut(&Perft, usize),
    ) -> bool {
        let root_counts = &mut self.plies[0];
        root_counts.nodes += 1;
        root_counts.positions.insert(position_hash(&root));
        if self.depth == 0 {
            return true;
        }

        let mut stack = vec![Frame::new(root, 0)];
        let mut expansions = 0u64;

        while !stack.is_empty() {
            expansions += 1;
            if expansions % PROGRESS_EVERY == 0 {
                if !running.load(Ordering::SeqCst) {
                    return false;
                }
                on_progress(self, stack.len());
            }

            let Some(frame) = stack.last_mut() else {
                break;
            };
            if frame.play_idx == frame.plays.len() {
                // Next roll, or pop once all rolls are done
                let Some(&roll) = self.rolls.get(frame.roll_idx) else {
                    stack.pop();
                    continue;
                };
                frame.roll_idx += 1;
                frame.plays = self.applier.legal_plays(&frame.board, roll);
                frame.play_idx = 0;
                continue;
            }

            let play = &frame.plays[frame.play_idx];
            let dance = play.is_empty();
            let after = frame.board.apply_play(play);
            let ply = frame.ply + 1;
            frame.play_idx += 1;

            let counts = &mut self.plies[ply];
            counts.nodes += 1;
            if dance {
                counts.dances += 1;
            }
            if after.own_checkers() == 0 {
                counts.terminals += 1;
                continue;
            }

            let child = after.revert();
            counts.positions.insert(position_hash(&child));
            if ply < self.depth {
                stack.push(Frame::new(child, ply));
                self.max_stack = self.max_stack.max(stack.len());
            }
        }
        true
    }
}

/// xxh64 of the signed layout, one byte per slot.
pub fn position_hash(board: &Board) -> u64 {
    let points = board.points();
    let mut bytes = [0u8; MAX_SLOTS];
    for (byte, &count) in bytes.iter_mut().zip(points) {
        *byte = count as u8;
    }
    xxh64(&bytes[..points.len()], 0)
}
