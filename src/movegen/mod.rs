//! Legal move generation.
//!
//! Enumerates the actions the validator accepts for a piece or a whole
//! side. Used by the built-in strategies, tests and benches.

use rand::Rng;

use crate::board::{Action, Board, Owner, PieceId};
use crate::rules::validate;

/// Generates every legal action for the piece with the given id, in
/// up, down, left, right order.
///
/// Returns an empty vec if the piece is gone or cannot move (flags and
/// mountains never can).
pub fn legal_actions_for(id: PieceId, board: &Board) -> Vec<Action> {
    let Some(piece) = board.piece(id) else {
        return Vec::new();
    };
    let from = piece.position();
    let owner = piece.owner();

    from.neighbors()
        .into_iter()
        .map(|to| Action::new(from, to))
        .filter(|&action| validate(action, owner, board))
        .collect()
}

/// Generates every legal action for the given side, unit by unit in
/// roster order.
pub fn legal_actions(owner: Owner, board: &Board) -> Vec<Action> {
    board
        .unit_ids(owner)
        .flat_map(|id| legal_actions_for(id, board))
        .collect()
}

/// Picks one legal action for the side uniformly at random, or `None` if
/// the side cannot move at all.
pub fn random_action(owner: Owner, board: &Board, rng: &mut impl Rng) -> Option<Action> {
    let legal = legal_actions(owner, board);
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceKind, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn open_field_has_four_moves() {
        let mut board = Board::empty();
        let id = board.place(PieceKind::Rock, Owner::PlayerZero, Position::new(8, 8)).unwrap();
        let actions = legal_actions_for(id, &board);
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0].to, Position::new(7, 8));
        assert_eq!(actions[3].to, Position::new(8, 9));
    }

    #[test]
    fn corner_and_blockers_reduce_moves() {
        let mut board = Board::empty();
        let id = board.place(PieceKind::Paper, Owner::PlayerOne, Position::new(1, 15)).unwrap();
        board.place(PieceKind::Mountain, Owner::Neutral, Position::new(2, 15));
        let actions = legal_actions_for(id, &board);
        assert_eq!(actions, vec![Action::new(Position::new(1, 15), Position::new(1, 14))]);
    }

    #[test]
    fn flags_never_move() {
        let board = Board::standard();
        let flag = board.roster_ids(Owner::PlayerZero).last().copied().unwrap();
        assert!(legal_actions_for(flag, &board).is_empty());
    }

    #[test]
    fn standard_opening_moves_are_all_legal() {
        let board = Board::standard();
        for owner in [Owner::PlayerZero, Owner::PlayerOne] {
            let actions = legal_actions(owner, &board);
            assert!(!actions.is_empty());
            assert!(actions.iter().all(|&a| validate(a, owner, &board)));
        }
    }

    #[test]
    fn random_action_is_deterministic_with_same_seed() {
        let board = Board::standard();
        let a = random_action(Owner::PlayerZero, &board, &mut StdRng::seed_from_u64(7));
        let b = random_action(Owner::PlayerZero, &board, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn random_action_none_without_units() {
        let mut board = Board::empty();
        board.place(PieceKind::Flag, Owner::PlayerOne, Position::new(15, 15));
        assert_eq!(random_action(Owner::PlayerOne, &board, &mut seeded_rng()), None);
    }
}
