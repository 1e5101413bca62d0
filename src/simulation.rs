//! Running many rounds and counting who wins.
//!
//! Each round gets its own dice, seeded from the run's base seed and the
//! round index. Rounds share nothing, so with more than one job they are
//! spread over a rayon thread pool and the per-thread tallies are merged;
//! a seeded run produces the same [`Tally`] whatever the job count.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, SimulationConfig};
use crate::dice::FastDice;
use crate::position::Player;
use crate::round::{Round, RoundResult};
use crate::strategy::StrategyBook;

/// Errors that stop a simulation before it starts.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One line of the final standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub player: Player,
    pub wins: u64,
}

/// Win counts accumulated over rounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    wins: BTreeMap<Player, u64>,
    rounds: u64,
    tied_rounds: u64,
    stalled_rounds: u64,
    turns: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished round. Every co-winner of a tie gets a win; a
    /// stalemate counts as a round without wins.
    pub fn record(&mut self, result: &RoundResult) {
        for &player in &result.winners {
            *self.wins.entry(player).or_default() += 1;
        }
        self.rounds += 1;
        self.turns += u64::from(result.turns);
        if result.is_tie() {
            self.tied_rounds += 1;
        }
        if result.is_stalled() {
            self.stalled_rounds += 1;
        }
    }

    /// Combine two partial tallies.
    pub fn merge(mut self, other: Tally) -> Tally {
        for (player, wins) in other.wins {
            *self.wins.entry(player).or_default() += wins;
        }
        self.rounds += other.rounds;
        self.tied_rounds += other.tied_rounds;
        self.stalled_rounds += other.stalled_rounds;
        self.turns += other.turns;
        self
    }

    pub fn wins(&self, player: Player) -> u64 {
        self.wins.get(&player).copied().unwrap_or(0)
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn tied_rounds(&self) -> u64 {
        self.tied_rounds
    }

    pub fn stalled_rounds(&self) -> u64 {
        self.stalled_rounds
    }

    /// Average number of turns per round.
    pub fn mean_turns(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.turns as f64 / self.rounds as f64
        }
    }

    /// Players with at least one win, most wins first, ties by player number.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<_> = self
            .wins
            .iter()
            .map(|(&player, &wins)| Standing { player, wins })
            .collect();
        standings.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.player.cmp(&b.player)));
        standings
    }
}

/// Result of a whole run, ready for printing.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub players: u32,
    pub tokens: u32,
    pub seed: u64,
    pub rounds: u64,
    pub tied_rounds: u64,
    pub stalled_rounds: u64,
    pub mean_turns: f64,
    pub standings: Vec<Standing>,
}

/// Owns the configuration and strategies for a batch of rounds.
pub struct Simulation {
    config: SimulationConfig,
    book: StrategyBook,
    seed: u64,
}

impl Simulation {
    /// Validate `config` and prepare a run with the default strategies.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        Ok(Self {
            config,
            book: StrategyBook::default(),
            seed,
        })
    }

    pub fn with_strategies(mut self, book: StrategyBook) -> Self {
        self.book = book;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn strategies(&self) -> &StrategyBook {
        &self.book
    }

    /// Base seed of the run, drawn at random when none was configured.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Play round number `index` of this run.
    pub fn play_round(&self, index: u64) -> RoundResult {
        let mut dice = FastDice::seeded(FastDice::round_seed(self.seed, index));
        Round::new(self.config.players, self.config.tokens, &self.book).play(&mut dice)
    }

    /// Play every round and return the final tally.
    pub fn run(&self) -> Result<Tally, SimulationError> {
        let rounds = u64::from(self.config.rounds);
        info!(
            players = self.config.players,
            tokens = self.config.tokens,
            rounds,
            seed = self.seed,
            jobs = self.config.jobs,
            "starting simulation"
        );

        let tally = if self.config.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()?;
            pool.install(|| {
                (0..rounds)
                    .into_par_iter()
                    .fold(Tally::new, |mut tally, index| {
                        tally.record(&self.play_round(index));
                        tally
                    })
                    .reduce(Tally::new, Tally::merge)
            })
        } else {
            let mut tally = Tally::new();
            for index in 0..rounds {
                tally.record(&self.play_round(index));
            }
            tally
        };

        info!(
            rounds = tally.rounds(),
            tied = tally.tied_rounds(),
            stalled = tally.stalled_rounds(),
            "simulation finished"
        );
        Ok(tally)
    }

    /// Run and package the result with the run's parameters.
    pub fn summarize(&self) -> Result<Summary, SimulationError> {
        let tally = self.run()?;
        Ok(Summary {
            players: self.config.players,
            tokens: self.config.tokens,
            seed: self.seed,
            rounds: tally.rounds(),
            tied_rounds: tally.tied_rounds(),
            stalled_rounds: tally.stalled_rounds(),
            mean_turns: tally.mean_turns(),
            standings: tally.standings(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winners: &[Player], turns: u32) -> RoundResult {
        RoundResult {
            winners: winners.to_vec(),
            turns,
        }
    }

    #[test]
    fn test_tally_record_and_standings() {
        let mut tally = Tally::new();
        tally.record(&result(&[2], 10));
        tally.record(&result(&[3, 4], 20));
        tally.record(&result(&[3], 30));
        assert_eq!(tally.rounds(), 3);
        assert_eq!(tally.tied_rounds(), 1);
        assert_eq!(tally.wins(3), 2);
        assert_eq!(tally.wins(1), 0);
        assert_eq!(tally.mean_turns(), 20.0);
        assert_eq!(
            tally.standings(),
            vec![
                Standing { player: 3, wins: 2 },
                Standing { player: 2, wins: 1 },
                Standing { player: 4, wins: 1 },
            ]
        );
    }

    #[test]
    fn test_tally_merge() {
        let mut a = Tally::new();
        a.record(&result(&[1], 5));
        let mut b = Tally::new();
        b.record(&result(&[1, 2], 7));
        let merged = a.merge(b);
        assert_eq!(merged.wins(1), 2);
        assert_eq!(merged.wins(2), 1);
        assert_eq!(merged.rounds(), 2);
        assert_eq!(merged.tied_rounds(), 1);
    }

    #[test]
    fn test_stalled_round_counts_without_wins() {
        let mut tally = Tally::new();
        tally.record(&result(&[], 40));
        tally.record(&result(&[2], 20));
        assert_eq!(tally.rounds(), 2);
        assert_eq!(tally.stalled_rounds(), 1);
        assert_eq!(tally.tied_rounds(), 0);
        assert_eq!(tally.standings(), vec![Standing { player: 2, wins: 1 }]);
        assert_eq!(tally.mean_turns(), 30.0);
    }

    #[test]
    fn test_empty_tally() {
        let tally = Tally::new();
        assert!(tally.standings().is_empty());
        assert_eq!(tally.mean_turns(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            rounds: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(SimulationError::Config(ConfigError::Rounds(0)))
        ));
    }

    #[test]
    fn test_seeded_run_counts_every_round() {
        let config = SimulationConfig {
            players: 2,
            tokens: 1,
            rounds: 10,
            seed: Some(11),
            jobs: 1,
        };
        let sim = Simulation::new(config).unwrap();
        let tally = sim.run().unwrap();
        assert_eq!(tally.rounds(), 10);
        let total: u64 = tally.standings().iter().map(|s| s.wins).sum();
        assert!(total >= 10);
    }
}
