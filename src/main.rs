//! Flag Rush -- runs one match between two built-in strategies.
//!
//! The board and the advantage bar are printed to stdout after every
//! round; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Default match: random walker vs. fortifier, 400 ms per move
//! cargo run --release
//!
//! # Fast, reproducible, machine-readable
//! cargo run --release -- --seed 7 --pause-ms 0 --max-rounds 500 --quiet --json
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flagrush::board::{Board, Owner};
use flagrush::config::{ConfigError, MatchConfig};
use flagrush::display::advantage;
use flagrush::game::{EndReason, Game, GameOutcome, Observer, Verdict};
use flagrush::rules::Resolution;
use flagrush::strategy::StrategyKind;

#[derive(Parser)]
#[command(name = "flagrush")]
#[command(about = "Rock-paper-scissors capture-the-flag match runner")]
#[command(version)]
struct Cli {
    /// JSON match config; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for the strategies (0 = entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Per-side time budget for choosing a move, in milliseconds
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Pause after each displayed round, in milliseconds
    #[arg(long)]
    pause_ms: Option<u64>,

    /// End the game as a tie after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Strategy for player zero
    #[arg(long, value_enum)]
    zero: Option<StrategyKind>,

    /// Strategy for player one
    #[arg(long, value_enum)]
    one: Option<StrategyKind>,

    /// Ask both strategies for their moves in parallel
    #[arg(long)]
    concurrent: bool,

    /// Print the outcome as one JSON line on stdout
    #[arg(long)]
    json: bool,

    /// Don't print boards or the final message
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn match_config(&self) -> Result<MatchConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ms) = self.budget_ms {
            config.move_budget_ms = ms;
        }
        if let Some(ms) = self.pause_ms {
            config.round_pause_ms = ms;
        }
        if self.max_rounds.is_some() {
            config.max_rounds = self.max_rounds;
        }
        if let Some(kind) = self.zero {
            config.player_zero = kind;
        }
        if let Some(kind) = self.one {
            config.player_one = kind;
        }
        config.concurrent_strategies |= self.concurrent;
        config.validate()?;
        Ok(config)
    }
}

/// Prints the board and the advantage bar after every round.
struct ConsoleObserver {
    pause: Duration,
    quiet: bool,
}

impl ConsoleObserver {
    fn show(&self, board: &Board) {
        println!("{board}");
        println!("The advantage bar:\n\t{}\n", advantage(board));
    }
}

impl Observer for ConsoleObserver {
    fn on_start(&mut self, board: &Board) {
        if !self.quiet {
            println!("{board}");
        }
    }

    fn on_round(&mut self, round: u32, board: &Board, resolution: &Resolution) {
        // A captured flag ends the game before the board changes.
        if self.quiet || resolution.is_decisive() {
            return;
        }
        println!("Round {round}");
        self.show(board);
        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }
    }

    fn on_finish(&mut self, _board: &Board, outcome: &GameOutcome) {
        if !self.quiet {
            println!("\n\t{outcome}\n");
        }
    }
}

/// Summary printed with `--json`.
#[derive(Serialize)]
struct MatchReport {
    verdict: Verdict,
    winner: Option<Owner>,
    reason: EndReason,
    rounds: u32,
    message: String,
    units_remaining: [usize; 2],
    player_zero: StrategyKind,
    player_one: StrategyKind,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();

    let config = match cli.match_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("flagrush: {e}");
            return ExitCode::from(2);
        }
    };

    let mut observer = ConsoleObserver {
        pause: config.round_pause(),
        quiet: cli.quiet,
    };
    let mut game = Game::from_config(&config);
    let outcome = game.run(&mut observer);

    if cli.json {
        let board = game.board();
        let report = MatchReport {
            verdict: outcome.verdict,
            winner: outcome.winner(),
            reason: outcome.reason,
            rounds: outcome.rounds,
            message: outcome.to_string(),
            units_remaining: [
                board.units(Owner::PlayerZero).count(),
                board.units(Owner::PlayerOne).count(),
            ],
            player_zero: config.player_zero,
            player_one: config.player_one,
        };
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("flagrush: failed to encode report: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
