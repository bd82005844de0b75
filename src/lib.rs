//! Flag Rush engine library.
//!
//! A two-player rock-paper-scissors capture-the-flag game on a 15x15 grid.
//! Exposes the board representation, move validation and combat
//! resolution, move generation, the built-in strategies and the round
//! orchestrator used by the binary, tests and benches.

pub mod board;
pub mod config;
pub mod display;
pub mod game;
pub mod movegen;
pub mod rules;
pub mod strategy;
