//! Simulation parameters and their validation.

use thiserror::Error;

use crate::constants::{DEFAULT_JOBS, DEFAULT_PLAYERS, DEFAULT_ROUNDS, DEFAULT_TOKENS};

/// Invalid simulation parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need at least one player, got {0}")]
    Players(u32),
    #[error("need at least one token per player, got {0}")]
    Tokens(u32),
    #[error("need at least one round, got {0}")]
    Rounds(u32),
    #[error("need at least one worker thread, got {0}")]
    Jobs(usize),
}

/// Parameters for a batch of rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of players
    pub players: u32,
    /// Tokens per player
    pub tokens: u32,
    /// Rounds to play
    pub rounds: u32,
    /// Base seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Worker threads for running rounds in parallel
    pub jobs: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS,
            tokens: DEFAULT_TOKENS,
            rounds: DEFAULT_ROUNDS,
            seed: None,
            jobs: DEFAULT_JOBS,
        }
    }
}

impl SimulationConfig {
    /// Reject counts that would make a simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::Players(self.players));
        }
        if self.tokens == 0 {
            return Err(ConfigError::Tokens(self.tokens));
        }
        if self.rounds == 0 {
            return Err(ConfigError::Rounds(self.rounds));
        }
        if self.jobs == 0 {
            return Err(ConfigError::Jobs(self.jobs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.players, 4);
        assert_eq!(config.tokens, 4);
        assert_eq!(config.rounds, 20);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_counts_rejected() {
        let base = SimulationConfig::default();
        let cases = [
            (SimulationConfig { players: 0, ..base.clone() }, ConfigError::Players(0)),
            (SimulationConfig { tokens: 0, ..base.clone() }, ConfigError::Tokens(0)),
            (SimulationConfig { rounds: 0, ..base.clone() }, ConfigError::Rounds(0)),
            (SimulationConfig { jobs: 0, ..base.clone() }, ConfigError::Jobs(0)),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ConfigError::Players(0).to_string(), "need at least one player, got 0");
        assert_eq!(ConfigError::Rounds(0).to_string(), "need at least one round, got 0");
    }
}
