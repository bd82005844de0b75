//! A proposed single-step move for one round.

use serde::{Deserialize, Serialize};

use super::piece::Owner;
use super::position::Position;

/// Move the piece at `from` to `to`. Has no identity beyond the round
/// in which it is proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub from: Position,
    pub to: Position,
}

impl Action {
    pub const fn new(from: Position, to: Position) -> Self {
        Action { from, to }
    }

    /// The "move your flag onto itself" action, returned by a strategy that
    /// has nothing to move. It never passes validation.
    pub fn pass(owner: Owner) -> Self {
        let flag = owner.flag_position().unwrap_or(Position::new(1, 1));
        Action { from: flag, to: flag }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_targets_own_flag() {
        let a = Action::pass(Owner::PlayerOne);
        assert_eq!(a.from, Position::new(15, 15));
        assert_eq!(a.from, a.to);
    }

    #[test]
    fn display_format() {
        let a = Action::new(Position::new(5, 5), Position::new(5, 6));
        assert_eq!(a.to_string(), "(5,5) -> (5,6)");
    }
}
