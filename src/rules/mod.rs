//! Game rules.
//!
//! Validation of single actions and resolution of a round's two actions
//! against the board.

pub mod resolve;
pub mod validate;

pub use resolve::{resolve, MoveReport, MoveResult, Outcome, Resolution};
pub use validate::{check_action, validate, IllegalMove};
