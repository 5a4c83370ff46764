//! Property-based tests for play enumeration.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use gammon_core::{
    single_die_moves, Board, CheckerPlay, Move, Roll, RollApplier, Variant, DIE_FACES,
};

/// Strategy: one of the board variants.
fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop::sample::select(vec![Variant::Standard, Variant::Half, Variant::Mini])
}

/// Strategy: a valid board of the given variant.
///
/// Own checkers land anywhere from the bar to the last point, or only in the
/// home board when `home_only` is drawn, so bearing off is well covered.
fn board_strategy(variant: Variant) -> impl Strategy<Value = Board> {
    let n = variant.geometry().checkers() as usize;
    (
        any::<bool>(),
        prop::collection::vec(any::<u8>(), 1..=n),
        prop::collection::vec(any::<u8>(), 0..=n),
    )
        .prop_map(move |(home_only, own, opponent)| build_board(variant, home_only, &own, &opponent))
}

fn build_board(variant: Variant, home_only: bool, own: &[u8], opponent: &[u8]) -> Board {
    let geometry = variant.geometry();
    let bear_off = geometry.bear_off();
    let mut layout = vec![0i8; geometry.slots()];
    for &seed in own {
        let pos = if home_only {
            geometry.inner() + seed as usize % geometry.home_size()
        } else {
            seed as usize % bear_off
        };
        layout[pos] += 1;
    }
    for &seed in opponent {
        // 1..=bear_off, where bear_off is the opponent's bar.
        let pos = 1 + seed as usize % bear_off;
        if layout[pos] <= 0 {
            layout[pos] -= 1;
        }
    }
    Board::new(geometry, &layout).unwrap()
}

/// Strategy: a board together with a roll for its dice.
fn position_strategy() -> impl Strategy<Value = (Board, Roll)> {
    variant_strategy().prop_flat_map(|variant| {
        (board_strategy(variant), 1..=DIE_FACES, 1..=DIE_FACES)
            .prop_map(|(board, a, b)| (board, Roll::new(a, b)))
    })
}

/// Every position reachable by playing the dice in every order, one move at a
/// time with no ordering restriction, keeping only the longest sequences.
fn brute_force(board: &Board, roll: Roll, doublet_uses: u8) -> BTreeSet<Vec<i8>> {
    fn walk(board: &Board, dice: &[u8], depth: usize, out: &mut Vec<(usize, u8, Board)>, first: u8) {
        let Some((&die, rest)) = dice.split_first() else {
            out.push((depth, first, *board));
            return;
        };
        let moves = single_die_moves(board, 0, die);
        if moves.is_empty() {
            out.push((depth, first, *board));
            return;
        }
        for mov in moves {
            let first = if depth == 0 { die } else { first };
            walk(&board.apply(mov), rest, depth + 1, out, first);
        }
    }

    let orders: Vec<Vec<u8>> = if roll.is_doublet() {
        vec![vec![roll.higher(); doublet_uses as usize]]
    } else {
        vec![
            vec![roll.higher(), roll.lower()],
            vec![roll.lower(), roll.higher()],
        ]
    };

    let mut reached = Vec::new();
    for dice in &orders {
        walk(board, dice, 0, &mut reached, 0);
    }
    let longest = reached.iter().map(|(depth, ..)| *depth).max().unwrap_or(0);
    let mut finals: Vec<&(usize, u8, Board)> =
        reached.iter().filter(|(depth, ..)| *depth == longest).collect();

    // A lone move must use the larger die when it can.
    if longest == 1 && !roll.is_doublet() && finals.iter().any(|(_, die, _)| *die == roll.higher()) {
        finals.retain(|(_, die, _)| *die == roll.higher());
    }
    finals.iter().map(|(_, _, b)| b.points().to_vec()).collect()
}

fn resulting(board: &Board, plays: &[CheckerPlay]) -> Vec<Vec<i8>> {
    plays.iter().map(|p| board.apply_play(p).points().to_vec()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    // 1. Same positions as an unrestricted search, each exactly once
    #[test]
    fn plays_match_brute_force((board, roll) in position_strategy()) {
        let plays = RollApplier::STANDARD.legal_plays(&board, roll);
        let results = resulting(&board, &plays);
        let distinct: BTreeSet<Vec<i8>> = results.iter().cloned().collect();
        prop_assert_eq!(distinct.len(), results.len(), "duplicate plays for {} on {:?}", roll, board);
        prop_assert_eq!(distinct, brute_force(&board, roll, 4), "roll {} on {:?}", roll, board);
    }

    // 2. Same, with doublets played twice
    #[test]
    fn plays_match_brute_force_without_doublet_bonus((board, roll) in position_strategy()) {
        let applier = RollApplier::doublet_disabled();
        let plays = applier.legal_plays(&board, roll);
        let distinct: BTreeSet<Vec<i8>> = resulting(&board, &plays).into_iter().collect();
        prop_assert_eq!(distinct.len(), plays.len());
        prop_assert_eq!(distinct, brute_force(&board, roll, 2));
    }

    // 3. All plays of a roll have the same length, and never more than allowed
    #[test]
    fn plays_have_equal_length((board, roll) in position_strategy()) {
        let plays = RollApplier::STANDARD.legal_plays(&board, roll);
        prop_assert!(!plays.is_empty());
        let len = plays[0].len();
        prop_assert!(plays.iter().all(|p| p.len() == len));
        let cap = if roll.is_doublet() { 4 } else { 2 };
        prop_assert!(len <= cap, "{} moves for {}", len, roll);
        if len == 0 {
            prop_assert_eq!(plays.len(), 1);
        }
    }

    // 4. Moves never land on a made point and conserve checkers
    #[test]
    fn moves_respect_blocks_and_conserve((board, roll) in position_strategy()) {
        let n = board.initial_checkers() as usize;
        for play in RollApplier::STANDARD.legal_plays(&board, roll) {
            let mut current = board;
            for &mov in play.moves() {
                let next = current.apply(mov);
                match mov {
                    Move::Step { to, hit, .. } => {
                        let before = current.opponent_at(to as usize);
                        prop_assert!(before <= 1, "{} lands on a made point", mov);
                        prop_assert_eq!(hit, before == 1);
                        prop_assert_eq!(next.own_checkers(), current.own_checkers());
                    }
                    Move::BearOff { .. } => {
                        prop_assert!(current.may_bear_off());
                        prop_assert_eq!(next.own_checkers() + 1, current.own_checkers());
                    }
                }
                prop_assert_eq!(next.opponent_checkers(), current.opponent_checkers());
                prop_assert_eq!(next.own_checkers() + next.own_borne_off(), n);
                current = next;
            }
            prop_assert_eq!(current, board.apply_play(&play));
        }
    }

    // 5. Enumeration is deterministic
    #[test]
    fn enumeration_deterministic((board, roll) in position_strategy()) {
        let applier = RollApplier::STANDARD;
        prop_assert_eq!(applier.legal_plays(&board, roll), applier.legal_plays(&board, roll));
    }

    // 6. revert is an involution that swaps the sides
    #[test]
    fn revert_involution(board in variant_strategy().prop_flat_map(board_strategy)) {
        let reverted = board.revert();
        prop_assert_eq!(reverted.revert(), board);
        prop_assert_eq!(reverted.own_checkers(), board.opponent_checkers());
        prop_assert_eq!(reverted.opponent_checkers(), board.own_checkers());
    }

    // 7. Boards survive a serde round trip
    #[test]
    fn board_serde_roundtrip(board in variant_strategy().prop_flat_map(board_strategy)) {
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, board);
    }
}

#[test]
fn test_random_playouts() {
    use rand::prelude::*;

    let mut rng = rand::rng();

    for variant in Variant::all() {
        let n = variant.geometry().checkers() as usize;

        for _ in 0..20 {
            let mut board = Board::starting(variant);

            for _ in 0..200 {
                let roll = Roll::new(
                    rng.random_range(1..=DIE_FACES),
                    rng.random_range(1..=DIE_FACES),
                );
                let plays = RollApplier::STANDARD.legal_plays(&board, roll);
                assert!(!plays.is_empty());

                let results: HashSet<Board> = plays.iter().map(|p| board.apply_play(p)).collect();
                assert_eq!(results.len(), plays.len(), "duplicate plays for {roll} on {board:?}");

                let play = &plays[rng.random_range(0..plays.len())];
                let after = board.apply_play(play);
                assert_eq!(after.own_checkers() + after.own_borne_off(), n);
                assert_eq!(after.opponent_checkers() + after.opponent_borne_off(), n);
                if after.own_checkers() == 0 {
                    break;
                }
                board = after.revert();
            }
        }
    }
}
