//! Fortifier: builds a wall in front of its own flag, then marches its
//! most numerous kind toward the enemy flag.
//!
//! The rules are written from player one's point of view (flag in the
//! bottom-right corner, enemy up and to the left). For player zero every
//! position is mirrored through the board centre on the way in and out.

use super::Strategy;
use crate::board::{Action, Board, Owner, PieceId, PieceKind, Position, UNIT_KINDS};
use crate::movegen::{legal_actions, legal_actions_for};
use crate::rules::validate;

/// First row (in the strategy's own frame) of the home band that gets walled.
const HOME_BAND_ROW: i32 = 13;

pub struct Fortifier {
    owner: Owner,
}

impl Fortifier {
    pub fn new(owner: Owner) -> Self {
        Fortifier { owner }
    }

    /// Converts between board coordinates and this side's frame. The
    /// mapping is its own inverse.
    fn frame(&self, pos: Position) -> Position {
        match self.owner {
            Owner::PlayerZero => pos.mirrored(),
            _ => pos,
        }
    }

    /// Shifts a home-band unit one cell toward the flag's edge of the board,
    /// if that cell is empty. Repeated, this packs a wall around the flag.
    fn wall_step(&self, board: &Board) -> Option<Action> {
        board.units(self.owner).find_map(|unit| {
            let here = self.frame(unit.position());
            if here.row < HOME_BAND_ROW {
                return None;
            }
            let beside = here.offset(0, 1);
            (beside.in_bounds() && board.is_empty_at(self.frame(beside)))
                .then(|| Action::new(unit.position(), self.frame(beside)))
        })
    }

    /// The most common kind among units outside the home band. Ties prefer
    /// Rock, then Paper, then Scissors.
    fn favoured_kind(&self, board: &Board) -> PieceKind {
        let mut counts = [0usize; 3];
        for unit in board.units(self.owner) {
            if self.frame(unit.position()).row >= HOME_BAND_ROW {
                continue;
            }
            if let Some(i) = UNIT_KINDS.iter().position(|&k| k == unit.kind()) {
                counts[i] += 1;
            }
        }
        let best = counts.iter().copied().max().unwrap_or(0);
        UNIT_KINDS
            .iter()
            .zip(counts)
            .find(|&(_, n)| n == best)
            .map(|(&k, _)| k)
            .unwrap_or(PieceKind::Rock)
    }

    /// First unit of `kind` in row-major order of this side's frame.
    fn lead_unit(&self, board: &Board, kind: PieceKind) -> Option<PieceId> {
        board
            .unit_ids(self.owner)
            .filter_map(|id| board.piece(id).map(|p| (id, p)))
            .filter(|(_, p)| p.kind() == kind)
            .min_by_key(|(_, p)| self.frame(p.position()))
            .map(|(id, _)| id)
    }

    /// One step toward the enemy: sideways, or forward when sideways runs
    /// off the board or into an own piece or a mountain.
    fn advance_step(&self, board: &Board, from: Position) -> Action {
        let here = self.frame(from);
        let sideways = here.offset(0, -1);
        let blocked = sideways.col < 1
            || board
                .piece_at(self.frame(sideways))
                .is_some_and(|p| p.owner() == self.owner || p.kind() == PieceKind::Mountain);
        let target = if blocked { here.offset(-1, 0) } else { sideways };
        Action::new(from, self.frame(target))
    }
}

impl Strategy for Fortifier {
    fn name(&self) -> &str {
        "fortify"
    }

    fn choose(&mut self, board: &Board) -> Action {
        if let Some(action) = self.wall_step(board) {
            return action;
        }

        let kind = self.favoured_kind(board);
        if let Some(id) = self.lead_unit(board, kind) {
            if let Some(from) = board.piece(id).map(|p| p.position()) {
                let step = self.advance_step(board, from);
                if validate(step, self.owner, board) {
                    return step;
                }
                if let Some(&fallback) = legal_actions_for(id, board).first() {
                    return fallback;
                }
            }
        }

        legal_actions(self.owner, board)
            .first()
            .copied()
            .unwrap_or(Action::pass(self.owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(r: i32, c: i32) -> Position {
        Position::new(r, c)
    }

    #[test]
    fn opening_builds_wall_for_player_one() {
        let board = Board::standard();
        let mut s = Fortifier::new(Owner::PlayerOne);
        let a = s.choose(&board);
        // Row 15 is packed up to the flag; (14,14) is the first home-band
        // unit in roster order with a free cell beside it.
        assert_eq!(a, Action::new(pos(14, 14), pos(14, 15)));
        assert!(validate(a, Owner::PlayerOne, &board));
    }

    #[test]
    fn player_zero_mirrors_the_wall() {
        let board = Board::standard();
        let mut s = Fortifier::new(Owner::PlayerZero);
        let a = s.choose(&board);
        assert_eq!(a, Action::new(pos(2, 2), pos(2, 1)));
        assert!(validate(a, Owner::PlayerZero, &board));
    }

    #[test]
    fn favoured_kind_counts_outside_home_band() {
        let mut board = Board::empty();
        board.place(PieceKind::Paper, Owner::PlayerOne, pos(5, 5));
        board.place(PieceKind::Paper, Owner::PlayerOne, pos(5, 7));
        board.place(PieceKind::Rock, Owner::PlayerOne, pos(6, 5));
        board.place(PieceKind::Rock, Owner::PlayerOne, pos(14, 5));
        board.place(PieceKind::Rock, Owner::PlayerOne, pos(15, 5));
        let s = Fortifier::new(Owner::PlayerOne);
        assert_eq!(s.favoured_kind(&board), PieceKind::Paper);
    }

    #[test]
    fn favoured_kind_tie_prefers_rock() {
        let mut board = Board::empty();
        board.place(PieceKind::Scissors, Owner::PlayerOne, pos(5, 5));
        board.place(PieceKind::Rock, Owner::PlayerOne, pos(6, 5));
        let s = Fortifier::new(Owner::PlayerOne);
        assert_eq!(s.favoured_kind(&board), PieceKind::Rock);
    }

    #[test]
    fn marches_left_then_up() {
        let mut board = Board::empty();
        board.place(PieceKind::Rock, Owner::PlayerOne, pos(8, 8));
        let mut s = Fortifier::new(Owner::PlayerOne);
        assert_eq!(s.choose(&board), Action::new(pos(8, 8), pos(8, 7)));

        board.place(PieceKind::Mountain, Owner::Neutral, pos(8, 7));
        assert_eq!(s.choose(&board), Action::new(pos(8, 8), pos(7, 8)));
    }

    #[test]
    fn blocked_advance_falls_back_to_a_legal_move() {
        let mut board = Board::empty();
        board.place(PieceKind::Rock, Owner::PlayerOne, pos(1, 1));
        let mut s = Fortifier::new(Owner::PlayerOne);
        // Left runs off the board, and so does up; only down/right remain.
        let a = s.choose(&board);
        assert!(validate(a, Owner::PlayerOne, &board));
        assert_eq!(a.from, pos(1, 1));
    }

    #[test]
    fn passes_without_units() {
        let mut board = Board::empty();
        board.place(PieceKind::Flag, Owner::PlayerOne, pos(15, 15));
        let mut s = Fortifier::new(Owner::PlayerOne);
        assert_eq!(s.choose(&board), Action::pass(Owner::PlayerOne));
    }
}
