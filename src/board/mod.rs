//! Board representation and game-state types.
//!
//! Contains coordinates, pieces and their dominance cycle, the per-round
//! action value, the fixed terrain and formation, and the board itself.

pub mod action;
pub mod piece;
pub mod position;
pub mod state;
pub mod terrain;

pub use action::Action;
pub use piece::{Owner, Piece, PieceKind, ALL_PLAYERS, UNIT_KINDS};
pub use position::{all_positions, Position, BOARD_SIZE, ORTHOGONAL_STEPS};
pub use state::{Board, PieceId};
pub use terrain::{formation, formation_kind, mountain_positions, MOUNTAIN_MAP};
