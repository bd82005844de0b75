//! Round orchestration.
//!
//! A [`Game`] owns the board and both strategies and walks the round state
//! machine:
//!
//! ```text
//! AwaitingMoves -> Validating -> Resolving -> AwaitingMoves
//!       |              |            |
//!       +--------------+------------+--> Terminal
//! ```
//!
//! `Terminal` is absorbing. A timeout, an illegal move or a captured flag
//! ends the game; there is no retry of a forfeited round.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::{Action, Board, Owner, ALL_PLAYERS};
use crate::config::MatchConfig;
use crate::rules::{check_action, resolve, MoveResult, Resolution};
use crate::strategy::{timed_choose, Strategy, TimedAction};

/// Who won, if anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    Winner(Owner),
    Tie,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EndReason {
    TimedOut,
    IllegalMove,
    FlagCaptured,
    /// The configured round limit was reached. Always a tie.
    RoundLimit,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            EndReason::TimedOut => "TimedOut",
            EndReason::IllegalMove => "IllegalMove",
            EndReason::FlagCaptured => "FlagCaptured",
            EndReason::RoundLimit => "RoundLimit",
        };
        f.write_str(tag)
    }
}

/// The terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameOutcome {
    pub verdict: Verdict,
    pub reason: EndReason,
    /// Rounds resolved before the game ended.
    pub rounds: u32,
}

impl GameOutcome {
    pub const fn winner(&self) -> Option<Owner> {
        match self.verdict {
            Verdict::Winner(owner) => Some(owner),
            Verdict::Tie => None,
        }
    }

    pub const fn is_tie(&self) -> bool {
        matches!(self.verdict, Verdict::Tie)
    }

    /// Builds the outcome for sides that failed a round-terminal check.
    /// Returns `None` when neither side failed.
    fn forfeit(failed: [bool; 2], reason: EndReason, rounds: u32) -> Option<GameOutcome> {
        let verdict = match failed {
            [false, false] => return None,
            [true, true] => Verdict::Tie,
            [true, false] => Verdict::Winner(Owner::PlayerOne),
            [false, true] => Verdict::Winner(Owner::PlayerZero),
        };
        Some(GameOutcome { verdict, reason, rounds })
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.verdict, self.reason) {
            (Verdict::Winner(w), EndReason::TimedOut) => {
                write!(f, "Time is over for {}. {} won", w.opponent(), capitalized(w))
            }
            (Verdict::Winner(w), EndReason::IllegalMove) => {
                write!(f, "{} played an illegal move. {} won", capitalized(w.opponent()), capitalized(w))
            }
            (Verdict::Winner(w), EndReason::FlagCaptured) => {
                write!(f, "{} won by capturing the flag", capitalized(w))
            }
            (Verdict::Winner(w), EndReason::RoundLimit) => {
                write!(f, "{} won at the round limit", capitalized(w))
            }
            (Verdict::Tie, EndReason::TimedOut) => {
                f.write_str("Tie. Both players used all their time")
            }
            (Verdict::Tie, EndReason::IllegalMove) => {
                f.write_str("Tie. Both players played illegal moves")
            }
            (Verdict::Tie, EndReason::FlagCaptured) => {
                f.write_str("Tie. Both players captured the flag at the same time")
            }
            (Verdict::Tie, EndReason::RoundLimit) => {
                write!(f, "Tie. Round limit of {} reached", self.rounds)
            }
        }
    }
}

fn capitalized(owner: Owner) -> &'static str {
    match owner {
        Owner::PlayerZero => "Player zero",
        Owner::PlayerOne => "Player one",
        Owner::Neutral => "Neutral",
    }
}

/// Where the round state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for both strategies to propose an action.
    AwaitingMoves,
    /// Both actions arrived in time; checking them.
    Validating { actions: [Action; 2] },
    /// Both actions are legal; applying them.
    Resolving { actions: [Action; 2] },
    /// The game is over.
    Terminal(GameOutcome),
}

/// Receives the board after each resolved round and the final outcome.
/// Purely consumptive: nothing flows back into the game.
pub trait Observer {
    fn on_start(&mut self, _board: &Board) {}

    fn on_round(&mut self, _round: u32, _board: &Board, _resolution: &Resolution) {}

    fn on_finish(&mut self, _board: &Board, _outcome: &GameOutcome) {}
}

/// An observer that ignores everything.
pub struct NullObserver;

impl Observer for NullObserver {}

/// One match between two strategies.
pub struct Game {
    board: Board,
    strategies: [Box<dyn Strategy>; 2],
    budget: Duration,
    concurrent: bool,
    max_rounds: Option<u32>,
    rounds: u32,
    phase: Phase,
    last_resolution: Option<Resolution>,
}

impl Game {
    /// Creates a game on `board` with the default 400 ms budget, sequential
    /// strategy calls and no round limit.
    pub fn new(board: Board, zero: Box<dyn Strategy>, one: Box<dyn Strategy>) -> Self {
        Game {
            board,
            strategies: [zero, one],
            budget: MatchConfig::default().move_budget(),
            concurrent: false,
            max_rounds: None,
            rounds: 0,
            phase: Phase::AwaitingMoves,
            last_resolution: None,
        }
    }

    /// Creates a game on the standard board with the configured strategies
    /// and limits.
    pub fn from_config(config: &MatchConfig) -> Self {
        let zero = config.player_zero.build(Owner::PlayerZero, config.seed_for(0));
        let one = config.player_one.build(Owner::PlayerOne, config.seed_for(1));
        Game::new(Board::standard(), zero, one)
            .with_budget(config.move_budget())
            .with_max_rounds(config.max_rounds)
            .with_concurrent_strategies(config.concurrent_strategies)
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_concurrent_strategies(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Per-side time budget for choosing a move.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Rounds resolved so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The resolution of the most recent round, if any round resolved.
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    /// Performs one state transition and returns the new phase.
    pub fn step(&mut self) -> &Phase {
        let current = self.phase;
        self.phase = match current {
            Phase::AwaitingMoves => self.await_moves(),
            Phase::Validating { actions } => self.validate_moves(actions),
            Phase::Resolving { actions } => self.resolve_moves(actions),
            terminal @ Phase::Terminal(_) => terminal,
        };
        &self.phase
    }

    /// Steps until the next round starts or the game ends. Returns the
    /// outcome once the game is over.
    pub fn play_round(&mut self) -> Option<GameOutcome> {
        loop {
            match *self.step() {
                Phase::Terminal(outcome) => return Some(outcome),
                Phase::AwaitingMoves => return None,
                Phase::Validating { .. } | Phase::Resolving { .. } => {}
            }
        }
    }

    /// Plays the game to completion, reporting each resolved round.
    pub fn run(&mut self, observer: &mut dyn Observer) -> GameOutcome {
        info!(
            zero = self.strategies[0].name(),
            one = self.strategies[1].name(),
            budget_ms = self.budget.as_millis() as u64,
            "game started"
        );
        observer.on_start(&self.board);
        loop {
            let before = self.rounds;
            let done = self.play_round();
            if self.rounds > before {
                if let Some(resolution) = &self.last_resolution {
                    observer.on_round(self.rounds, &self.board, resolution);
                }
            }
            if let Some(outcome) = done {
                observer.on_finish(&self.board, &outcome);
                return outcome;
            }
        }
    }

    fn await_moves(&mut self) -> Phase {
        let timed = self.gather();
        for (owner, t) in ALL_PLAYERS.iter().zip(&timed) {
            if t.timed_out {
                warn!(
                    player = %owner,
                    elapsed_ms = t.elapsed.as_millis() as u64,
                    budget_ms = self.budget.as_millis() as u64,
                    "strategy exceeded its time budget"
                );
            }
            if t.action.is_none() {
                warn!(player = %owner, "strategy panicked; forfeiting with a pass");
            }
        }
        match GameOutcome::forfeit(timed.map(|t| t.timed_out), EndReason::TimedOut, self.rounds) {
            Some(outcome) => self.finish(outcome),
            None => {
                // A side with no action passes, which never validates.
                let [t0, t1] = timed;
                Phase::Validating {
                    actions: [
                        t0.action.unwrap_or(Action::pass(Owner::PlayerZero)),
                        t1.action.unwrap_or(Action::pass(Owner::PlayerOne)),
                    ],
                }
            }
        }
    }

    /// Asks both strategies for a move, one after the other or in parallel.
    /// Each call is timed on its own either way.
    fn gather(&mut self) -> [TimedAction; 2] {
        let board = &self.board;
        let budget = self.budget;
        let [zero, one] = &mut self.strategies;
        if self.concurrent {
            let (t0, t1) = rayon::join(
                || timed_choose(&mut **zero, board, budget),
                || timed_choose(&mut **one, board, budget),
            );
            [t0, t1]
        } else {
            let t0 = timed_choose(&mut **zero, board, budget);
            let t1 = timed_choose(&mut **one, board, budget);
            [t0, t1]
        }
    }

    /// Illegal actions end the game here; they never reach the resolver.
    fn validate_moves(&mut self, actions: [Action; 2]) -> Phase {
        let mut invalid = [false; 2];
        for (i, (&owner, &action)) in ALL_PLAYERS.iter().zip(&actions).enumerate() {
            if let Err(e) = check_action(action, owner, &self.board) {
                warn!(player = %owner, reason = %e, "illegal move");
                invalid[i] = true;
            }
        }
        match GameOutcome::forfeit(invalid, EndReason::IllegalMove, self.rounds) {
            Some(outcome) => self.finish(outcome),
            None => Phase::Resolving { actions },
        }
    }

    fn resolve_moves(&mut self, [action0, action1]: [Action; 2]) -> Phase {
        let resolution = resolve(&mut self.board, action0, action1);
        self.rounds += 1;
        for report in &resolution.moves {
            if report.result != MoveResult::Void {
                debug!(
                    round = self.rounds,
                    player = %report.owner,
                    action = %report.action,
                    result = ?report.result,
                    "move resolved"
                );
            }
        }
        self.last_resolution = Some(resolution);

        if resolution.tie {
            return self.finish(GameOutcome {
                verdict: Verdict::Tie,
                reason: EndReason::FlagCaptured,
                rounds: self.rounds,
            });
        }
        if let Some(winner) = resolution.outcome.winner() {
            return self.finish(GameOutcome {
                verdict: Verdict::Winner(winner),
                reason: EndReason::FlagCaptured,
                rounds: self.rounds,
            });
        }
        if self.max_rounds.is_some_and(|limit| self.rounds >= limit) {
            return self.finish(GameOutcome {
                verdict: Verdict::Tie,
                reason: EndReason::RoundLimit,
                rounds: self.rounds,
            });
        }
        Phase::AwaitingMoves
    }

    fn finish(&self, outcome: GameOutcome) -> Phase {
        info!(
            rounds = outcome.rounds,
            reason = %outcome.reason,
            winner = ?outcome.winner(),
            "game over: {}",
            outcome
        );
        Phase::Terminal(outcome)
    }
}
