//! Move-selection strategies.
//!
//! A strategy sees the board read-only and proposes one action per round.
//! It is not required to police its own time; the orchestrator measures
//! each call with [`timed_choose`] and forfeits a side that overruns.

pub mod fortify;
pub mod random;

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::board::{Action, Board, Owner};

pub use fortify::Fortifier;
pub use random::RandomWalker;

/// A move-selection provider for one side.
pub trait Strategy: Send {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Proposes this round's action. Must not assume it will be legal.
    fn choose(&mut self, board: &Board) -> Action;
}

/// An action together with how long the strategy took to produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedAction {
    /// `None` if the strategy panicked instead of answering.
    pub action: Option<Action>,
    pub elapsed: Duration,
    /// `elapsed` exceeded the budget.
    pub timed_out: bool,
}

/// Runs a strategy and measures its wall-clock time against `budget`.
///
/// The call is never interrupted; an overrun is only recorded. A panic
/// inside the strategy is caught and reported as a missing action.
pub fn timed_choose<S: Strategy + ?Sized>(
    strategy: &mut S,
    board: &Board,
    budget: Duration,
) -> TimedAction {
    let start = Instant::now();
    let action = panic::catch_unwind(AssertUnwindSafe(|| strategy.choose(board))).ok();
    let elapsed = start.elapsed();
    TimedAction {
        action,
        elapsed,
        timed_out: elapsed > budget,
    }
}

/// The built-in strategies, selectable from config and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Wander with the last unit of the roster.
    Random,
    /// Wall off the home corner, then push the most common kind forward.
    Fortify,
}

impl StrategyKind {
    /// Builds a strategy for `owner`. `seed` of 0 draws from entropy.
    pub fn build(self, owner: Owner, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomWalker::new(owner, seed)),
            StrategyKind::Fortify => Box::new(Fortifier::new(owner)),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Random => f.write_str("random"),
            StrategyKind::Fortify => f.write_str("fortify"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    struct Sleeper(Duration);

    impl Strategy for Sleeper {
        fn name(&self) -> &str {
            "sleeper"
        }

        fn choose(&mut self, _board: &Board) -> Action {
            std::thread::sleep(self.0);
            Action::new(Position::new(1, 2), Position::new(2, 2))
        }
    }

    #[test]
    fn fast_strategy_within_budget() {
        let board = Board::standard();
        let mut s = Sleeper(Duration::ZERO);
        let t = timed_choose(&mut s, &board, Duration::from_millis(400));
        assert!(!t.timed_out);
        assert_eq!(t.action.map(|a| a.from), Some(Position::new(1, 2)));
    }

    #[test]
    fn slow_strategy_times_out() {
        let board = Board::standard();
        let mut s = Sleeper(Duration::from_millis(30));
        let t = timed_choose(&mut s, &board, Duration::from_millis(5));
        assert!(t.timed_out);
        assert!(t.elapsed >= Duration::from_millis(30));
    }

    struct Broken;

    impl Strategy for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn choose(&mut self, _board: &Board) -> Action {
            panic!("no move today");
        }
    }

    #[test]
    fn panicking_strategy_yields_no_action() {
        let board = Board::standard();
        let t = timed_choose(&mut Broken, &board, Duration::from_millis(400));
        assert_eq!(t.action, None);
        assert!(!t.timed_out);
    }

    #[test]
    fn kinds_build_named_strategies() {
        let r = StrategyKind::Random.build(Owner::PlayerZero, 1);
        let f = StrategyKind::Fortify.build(Owner::PlayerOne, 1);
        assert_eq!(r.name(), "random");
        assert_eq!(f.name(), "fortify");
    }

    #[test]
    fn kind_serde_names() {
        let k: StrategyKind = serde_json::from_str("\"fortify\"").unwrap();
        assert_eq!(k, StrategyKind::Fortify);
        assert_eq!(serde_json::to_string(&StrategyKind::Random).unwrap(), "\"random\"");
    }
}
