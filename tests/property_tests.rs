//! Property tests for the movement and combat rules.

use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use flagrush::board::{Action, Board, Owner, PieceKind, Position, UNIT_KINDS};
use flagrush::game::{Game, NullObserver};
use flagrush::movegen::{legal_actions, random_action};
use flagrush::rules::{resolve, validate};
use flagrush::strategy::RandomWalker;

fn arb_unit_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(UNIT_KINDS.to_vec())
}

/// Positions on the board plus a one-cell margin outside it.
fn arb_position() -> impl Strategy<Value = Position> {
    (0i32..=16, 0i32..=16).prop_map(|(row, col)| Position::new(row, col))
}

fn arb_owner() -> impl Strategy<Value = Owner> {
    prop::sample::select(vec![Owner::PlayerZero, Owner::PlayerOne])
}

proptest! {
    /// Among the three unit kinds, every distinct pair has exactly one
    /// winner and no kind beats itself.
    #[test]
    fn prop_dominance_is_a_cycle(a in arb_unit_kind(), b in arb_unit_kind()) {
        if a == b {
            prop_assert!(!a.beats(b));
        } else {
            prop_assert!(a.beats(b) ^ b.beats(a));
        }
    }

    /// Mountains and flags never take part in dominance.
    #[test]
    fn prop_terrain_never_dominates(a in arb_unit_kind()) {
        for other in [PieceKind::Mountain, PieceKind::Flag] {
            prop_assert!(!a.beats(other));
            prop_assert!(!other.beats(a));
        }
    }

    /// Anything that validates on the standard board is a single orthogonal
    /// step of the mover's own unit, within the board.
    #[test]
    fn prop_valid_actions_are_orthogonal_steps(
        from in arb_position(),
        to in arb_position(),
        owner in arb_owner(),
    ) {
        let board = Board::standard();
        let action = Action::new(from, to);
        if validate(action, owner, &board) {
            prop_assert!(from.in_bounds() && to.in_bounds());
            prop_assert_eq!(from.manhattan(to), 1);
            let mover = board.piece_at(from).copied();
            prop_assert!(mover.is_some_and(|p| p.owner() == owner && p.kind().is_unit()));
        }
    }

    /// Diagonal steps never validate, whatever is on the board.
    #[test]
    fn prop_diagonal_never_valid(
        row in 1i32..=15,
        col in 1i32..=15,
        dr in prop::sample::select(vec![-1i32, 1]),
        dc in prop::sample::select(vec![-1i32, 1]),
        owner in arb_owner(),
    ) {
        let board = Board::standard();
        let action = Action::new(Position::new(row, col), Position::new(row + dr, col + dc));
        prop_assert!(!validate(action, owner, &board));
    }

    /// Every generated action is legal.
    #[test]
    fn prop_generated_actions_validate(seed in any::<u64>(), owner in arb_owner()) {
        let board = Board::standard();
        let mut rng = StdRng::seed_from_u64(seed);
        let action = random_action(owner, &board, &mut rng);
        prop_assert!(action.is_some_and(|a| validate(a, owner, &board)));
        for a in legal_actions(owner, &board) {
            prop_assert!(validate(a, owner, &board));
        }
    }

    /// Grid, rosters and recorded positions agree after any sequence of
    /// legal rounds, and pieces are only ever removed.
    #[test]
    fn prop_board_stays_consistent(seed in any::<u64>(), rounds in 1usize..80) {
        let mut board = Board::standard();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut count = board.pieces().count();
        for _ in 0..rounds {
            let (Some(a0), Some(a1)) = (
                random_action(Owner::PlayerZero, &board, &mut rng),
                random_action(Owner::PlayerOne, &board, &mut rng),
            ) else {
                break;
            };
            let res = resolve(&mut board, a0, a1);
            prop_assert!(board.is_consistent());
            let now = board.pieces().count();
            prop_assert!(now <= count);
            count = now;
            prop_assert_eq!(board.mountains().count(), 20);
            prop_assert!(board.flag(Owner::PlayerZero).is_some());
            prop_assert!(board.flag(Owner::PlayerOne).is_some());
            if res.is_decisive() {
                break;
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Seeded random games replay identically.
    #[test]
    fn prop_seeded_games_are_deterministic(seed in 1u64..u64::MAX) {
        let play = || {
            let mut game = Game::new(
                Board::standard(),
                Box::new(RandomWalker::new(Owner::PlayerZero, seed)),
                Box::new(RandomWalker::new(Owner::PlayerOne, seed.wrapping_add(1).max(1))),
            )
            .with_budget(Duration::from_secs(10))
            .with_max_rounds(Some(40));
            let outcome = game.run(&mut NullObserver);
            (outcome, game.board().clone())
        };
        let (first, board_a) = play();
        let (second, board_b) = play();
        prop_assert_eq!(first, second);
        prop_assert_eq!(board_a, board_b);
    }
}
