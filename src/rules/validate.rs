//! Move validation.
//!
//! A pure predicate over (action, mover, board). The orchestrator only
//! needs the yes/no answer; [`check_action`] also reports which rule the
//! action broke, for logging.

use crate::board::{Action, Board, Owner, PieceKind};

/// Why an action was rejected. All variants surface to the game as a
/// single "illegal move" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("move leaves the board: {0}")]
    OutOfBounds(Action),

    #[error("no piece of the mover at {}", .0.from)]
    NotOwnPiece(Action),

    #[error("the flag at {} cannot move", .0.from)]
    OwnFlagImmovable(Action),

    #[error("destination {} holds one of the mover's own pieces", .0.to)]
    OccupiedByOwnPiece(Action),

    #[error("destination {} is a mountain", .0.to)]
    MountainBlocked(Action),

    #[error("{0} is not a single orthogonal step")]
    NotAdjacent(Action),
}

/// Checks an action against every movement rule, returning the first one
/// it breaks.
///
/// Rules, in order: both cells on the board; `from` holds a piece owned by
/// `owner`; that piece is not the flag; `to` does not hold an `owner`
/// piece; `to` is not a mountain; `to` is one orthogonal step from `from`.
pub fn check_action(action: Action, owner: Owner, board: &Board) -> Result<(), IllegalMove> {
    if !action.from.in_bounds() || !action.to.in_bounds() {
        return Err(IllegalMove::OutOfBounds(action));
    }

    let mover = board
        .piece_at(action.from)
        .filter(|p| p.owner() == owner && owner.is_player())
        .ok_or(IllegalMove::NotOwnPiece(action))?;

    if mover.kind() == PieceKind::Flag {
        return Err(IllegalMove::OwnFlagImmovable(action));
    }

    if let Some(target) = board.piece_at(action.to) {
        if target.owner() == owner {
            return Err(IllegalMove::OccupiedByOwnPiece(action));
        }
        if target.kind() == PieceKind::Mountain {
            return Err(IllegalMove::MountainBlocked(action));
        }
    }

    if !action.from.is_orthogonally_adjacent(action.to) {
        return Err(IllegalMove::NotAdjacent(action));
    }

    Ok(())
}

/// Returns true iff `owner` may play `action` on `board`.
pub fn validate(action: Action, owner: Owner, board: &Board) -> bool {
    check_action(action, owner, board).is_ok()
}
