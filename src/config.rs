//! Match configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. The binary loads an optional JSON file and then applies its
//! command-line overrides on top.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyKind;

/// Default per-side budget for choosing a move, in milliseconds.
pub const DEFAULT_MOVE_BUDGET_MS: u64 = 400;

/// Default pause between displayed rounds, in milliseconds.
pub const DEFAULT_ROUND_PAUSE_MS: u64 = 1000;

/// Errors that can occur while loading a match configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Wall-clock budget per side per round (milliseconds).
    pub move_budget_ms: u64,
    /// Pause after each displayed round (milliseconds). Only the binary's
    /// console display sleeps; the engine never does.
    pub round_pause_ms: u64,
    /// End the game as a tie after this many rounds. `None` plays until a
    /// terminal condition.
    pub max_rounds: Option<u32>,
    /// Random seed for the strategies (0 = use entropy).
    pub seed: u64,
    /// Ask both strategies for their moves at the same time instead of one
    /// after the other. Each side is still timed on its own.
    pub concurrent_strategies: bool,
    pub player_zero: StrategyKind,
    pub player_one: StrategyKind,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            move_budget_ms: DEFAULT_MOVE_BUDGET_MS,
            round_pause_ms: DEFAULT_ROUND_PAUSE_MS,
            max_rounds: None,
            seed: 0,
            concurrent_strategies: false,
            player_zero: StrategyKind::Random,
            player_one: StrategyKind::Fortify,
        }
    }
}

impl MatchConfig {
    /// Parses a config from JSON text and validates it.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_budget_ms == 0 {
            return Err(ConfigError::Invalid("move_budget_ms must be positive".to_string()));
        }
        if self.max_rounds == Some(0) {
            return Err(ConfigError::Invalid("max_rounds must be positive".to_string()));
        }
        Ok(())
    }

    pub fn move_budget(&self) -> Duration {
        Duration::from_millis(self.move_budget_ms)
    }

    pub fn round_pause(&self) -> Duration {
        Duration::from_millis(self.round_pause_ms)
    }

    /// Seed for one side's strategy. Sides get distinct seeds so two random
    /// walkers don't mirror each other; 0 stays 0 (entropy).
    pub fn seed_for(&self, side: usize) -> u64 {
        if self.seed == 0 {
            0
        } else {
            self.seed.wrapping_add(side as u64).max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = MatchConfig::default();
        assert_eq!(c.move_budget(), Duration::from_millis(400));
        assert_eq!(c.round_pause(), Duration::from_millis(1000));
        assert_eq!(c.max_rounds, None);
        assert_eq!(c.player_zero, StrategyKind::Random);
        assert_eq!(c.player_one, StrategyKind::Fortify);
        assert!(!c.concurrent_strategies);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = MatchConfig::from_json_str(r#"{"max_rounds": 50, "player_zero": "fortify"}"#)
            .unwrap();
        assert_eq!(c.max_rounds, Some(50));
        assert_eq!(c.player_zero, StrategyKind::Fortify);
        assert_eq!(c.move_budget_ms, DEFAULT_MOVE_BUDGET_MS);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = MatchConfig::from_json_str(r#"{"board_size": 20}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_budget_rejected() {
        let err = MatchConfig::from_json_str(r#"{"move_budget_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = MatchConfig::load("/nonexistent/flagrush.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/flagrush.json"));
    }

    #[test]
    fn side_seeds_differ() {
        let c = MatchConfig { seed: 10, ..MatchConfig::default() };
        assert_ne!(c.seed_for(0), c.seed_for(1));
        let e = MatchConfig::default();
        assert_eq!(e.seed_for(0), 0);
        assert_eq!(e.seed_for(1), 0);
    }
}
