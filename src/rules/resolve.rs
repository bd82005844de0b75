//! Combat resolution.
//!
//! Applies one validated action per side to the board and reports whether a
//! flag fell. Resolution runs in three stages:
//!
//! 1. Flag race: an action ending on the opposing flag wins outright
//!    (both at once is a tie) and nothing else is applied.
//! 2. Same destination: the dominant kind takes the cell and the other
//!    piece is destroyed; equal kinds bounce and nothing changes.
//! 3. Independent destinations: player zero's action is applied first, then
//!    player one's against the updated board.
//!
//! Stage 3 is sequential, so player one can walk into a cell player zero
//! vacated in the same round. That asymmetry is part of the rules.

use serde::Serialize;

use crate::board::{Action, Board, Owner, PieceId, PieceKind};

/// The round's verdict as seen by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    PlayerZeroWins,
    PlayerOneWins,
    Undecided,
}

impl Outcome {
    pub const fn winner(self) -> Option<Owner> {
        match self {
            Outcome::PlayerZeroWins => Some(Owner::PlayerZero),
            Outcome::PlayerOneWins => Some(Owner::PlayerOne),
            Outcome::Undecided => None,
        }
    }

    const fn won_by(owner: Owner) -> Outcome {
        match owner {
            Owner::PlayerZero => Outcome::PlayerZeroWins,
            Owner::PlayerOne => Outcome::PlayerOneWins,
            Owner::Neutral => Outcome::Undecided,
        }
    }
}

/// What happened to one side's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveResult {
    /// Entered an empty cell.
    Moved,
    /// Met a piece of equal kind (or nothing it could fight); nothing moved.
    Bounced,
    /// Destroyed a piece of the given kind and took its cell.
    Captured(PieceKind),
    /// Was destroyed by a piece of the given kind.
    Destroyed(PieceKind),
    /// Reached the opposing flag.
    FlagCaptured,
    /// Not applied: the mover was already gone, or the round ended on a
    /// flag capture first.
    Void,
}

/// One side's action and its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MoveReport {
    pub owner: Owner,
    pub action: Action,
    pub result: MoveResult,
}

/// Result of resolving one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Both flags fell in the same round.
    pub tie: bool,
    /// Player zero's report, then player one's.
    pub moves: [MoveReport; 2],
}

impl Resolution {
    /// True if the round ended the game.
    pub const fn is_decisive(&self) -> bool {
        self.tie || !matches!(self.outcome, Outcome::Undecided)
    }
}

fn report(owner: Owner, action: Action, result: MoveResult) -> MoveReport {
    MoveReport { owner, action, result }
}

/// Resolves one round. Both actions must already have passed validation
/// for their side; they are not re-checked.
pub fn resolve(board: &mut Board, action0: Action, action1: Action) -> Resolution {
    let zero_takes_flag = Owner::PlayerOne.flag_position() == Some(action0.to);
    let one_takes_flag = Owner::PlayerZero.flag_position() == Some(action1.to);

    if zero_takes_flag || one_takes_flag {
        let result_for = |took: bool| if took { MoveResult::FlagCaptured } else { MoveResult::Void };
        let outcome = match (zero_takes_flag, one_takes_flag) {
            (true, false) => Outcome::won_by(Owner::PlayerZero),
            (false, true) => Outcome::won_by(Owner::PlayerOne),
            _ => Outcome::Undecided,
        };
        return Resolution {
            outcome,
            tie: zero_takes_flag && one_takes_flag,
            moves: [
                report(Owner::PlayerZero, action0, result_for(zero_takes_flag)),
                report(Owner::PlayerOne, action1, result_for(one_takes_flag)),
            ],
        };
    }

    // Movers are fixed before anything moves, so a piece destroyed earlier
    // in the round cannot have its cell's new occupant moved in its place.
    let mover0 = board.id_at(action0.from);
    let mover1 = board.id_at(action1.from);

    let [result0, result1] = if action0.to == action1.to {
        contest(board, action0, action1, mover0, mover1)
    } else {
        let r0 = advance(board, Owner::PlayerZero, mover0, action0);
        let r1 = advance(board, Owner::PlayerOne, mover1, action1);
        [r0, r1]
    };

    debug_assert!(board.is_consistent());

    Resolution {
        outcome: Outcome::Undecided,
        tie: false,
        moves: [
            report(Owner::PlayerZero, action0, result0),
            report(Owner::PlayerOne, action1, result1),
        ],
    }
}

fn live_mover(board: &Board, mover: Option<PieceId>) -> Option<(PieceId, PieceKind)> {
    mover.and_then(|id| board.piece(id).map(|p| (id, p.kind())))
}

/// Both sides target the same cell, which is necessarily empty.
fn contest(
    board: &mut Board,
    action0: Action,
    action1: Action,
    mover0: Option<PieceId>,
    mover1: Option<PieceId>,
) -> [MoveResult; 2] {
    let (Some((id0, kind0)), Some((id1, kind1))) =
        (live_mover(board, mover0), live_mover(board, mover1))
    else {
        let r0 = advance(board, Owner::PlayerZero, mover0, action0);
        let r1 = advance(board, Owner::PlayerOne, mover1, action1);
        return [r0, r1];
    };

    let dest = action0.to;
    if kind0.beats(kind1) {
        board.remove(id1);
        board.relocate(id0, dest);
        [MoveResult::Captured(kind1), MoveResult::Destroyed(kind0)]
    } else if kind1.beats(kind0) {
        board.remove(id0);
        board.relocate(id1, dest);
        [MoveResult::Destroyed(kind1), MoveResult::Captured(kind0)]
    } else {
        [MoveResult::Bounced, MoveResult::Bounced]
    }
}

/// Applies one side's action against the current state of its
/// destination cell.
fn advance(board: &mut Board, owner: Owner, mover: Option<PieceId>, action: Action) -> MoveResult {
    let Some((id, kind)) = live_mover(board, mover) else {
        return MoveResult::Void;
    };

    let Some(defender_id) = board.id_at(action.to) else {
        board.relocate(id, action.to);
        return MoveResult::Moved;
    };
    let Some(defender) = board.piece(defender_id).copied() else {
        return MoveResult::Void;
    };
    if defender.owner() == owner {
        return MoveResult::Bounced;
    }

    let defender_kind = defender.kind();
    if kind.beats(defender_kind) {
        board.remove(defender_id);
        board.relocate(id, action.to);
        MoveResult::Captured(defender_kind)
    } else if defender_kind.beats(kind) {
        board.remove(id);
        MoveResult::Destroyed(defender_kind)
    } else {
        MoveResult::Bounced
    }
}
