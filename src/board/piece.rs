//! Piece kinds, ownership and the dominance cycle.

use serde::{Deserialize, Serialize};

use super::position::{Position, BOARD_SIZE};

/// The kind of a piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Rock,
    Paper,
    Scissors,
    Mountain,
    Flag,
}

/// The three kinds that move and fight, in combat-index order.
pub const UNIT_KINDS: [PieceKind; 3] = [PieceKind::Rock, PieceKind::Paper, PieceKind::Scissors];

impl PieceKind {
    /// Index into the dominance cycle: Rock=0, Paper=1, Scissors=2.
    /// Mountains and flags do not fight.
    const fn combat_index(self) -> Option<u8> {
        match self {
            PieceKind::Rock => Some(0),
            PieceKind::Paper => Some(1),
            PieceKind::Scissors => Some(2),
            PieceKind::Mountain | PieceKind::Flag => None,
        }
    }

    /// Returns true if `self` defeats `other` in combat.
    ///
    /// `a` beats `b` iff `(a - b) mod 3 == 1`: Paper beats Rock, Scissors
    /// beats Paper, Rock beats Scissors. No kind beats itself, and
    /// Mountain/Flag neither beat nor are beaten.
    pub const fn beats(self, other: PieceKind) -> bool {
        match (self.combat_index(), other.combat_index()) {
            (Some(a), Some(b)) => (a + 3 - b) % 3 == 1,
            _ => false,
        }
    }

    /// Returns true for Rock, Paper and Scissors.
    pub const fn is_unit(self) -> bool {
        self.combat_index().is_some()
    }

    /// Lowercase board symbol.
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Rock => 'r',
            PieceKind::Paper => 'p',
            PieceKind::Scissors => 's',
            PieceKind::Mountain => 'm',
            PieceKind::Flag => 'f',
        }
    }
}

/// Who a piece belongs to. Mountains are neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    PlayerZero,
    PlayerOne,
    Neutral,
}

/// The two sides, in resolution order.
pub const ALL_PLAYERS: [Owner; 2] = [Owner::PlayerZero, Owner::PlayerOne];

impl Owner {
    /// The opposing side. Neutral has no opponent and maps to itself.
    pub const fn opponent(self) -> Owner {
        match self {
            Owner::PlayerZero => Owner::PlayerOne,
            Owner::PlayerOne => Owner::PlayerZero,
            Owner::Neutral => Owner::Neutral,
        }
    }

    /// The fixed corner holding this player's flag.
    pub const fn flag_position(self) -> Option<Position> {
        match self {
            Owner::PlayerZero => Some(Position::new(1, 1)),
            Owner::PlayerOne => Some(Position::new(BOARD_SIZE, BOARD_SIZE)),
            Owner::Neutral => None,
        }
    }

    pub(crate) const fn roster_index(self) -> Option<usize> {
        match self {
            Owner::PlayerZero => Some(0),
            Owner::PlayerOne => Some(1),
            Owner::Neutral => None,
        }
    }

    pub const fn is_player(self) -> bool {
        !matches!(self, Owner::Neutral)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Owner::PlayerZero => "player zero",
            Owner::PlayerOne => "player one",
            Owner::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A piece on the board. Kind and owner never change; the position is
/// updated only by [`Board`](super::Board) so it always matches the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    owner: Owner,
    position: Position,
}

impl Piece {
    pub(crate) const fn new(kind: PieceKind, owner: Owner, position: Position) -> Self {
        Piece { kind, owner, position }
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn owner(&self) -> Owner {
        self.owner
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Board symbol: lowercase for player zero, uppercase for player one,
    /// `M` for mountains.
    pub fn symbol(&self) -> char {
        match self.owner {
            Owner::PlayerZero => self.kind.symbol(),
            Owner::PlayerOne | Owner::Neutral => self.kind.symbol().to_ascii_uppercase(),
        }
    }
}
