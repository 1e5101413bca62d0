//! Ludo-Sim: a Monte Carlo simulator for Ludo.
//!
//! The crate plays complete games of Ludo between computer players, each
//! following a fixed strategy, and counts how often each player wins.
//!
//! ## Modules
//!
//! - [`constants`] - Board and turn rule constants, simulation defaults
//! - [`board`] - Track length, entry cells and finish distance
//! - [`position`] - Tokens and their positions
//! - [`dice`] - Seedable random source
//! - [`moves`] - Move legality, captures and stacking
//! - [`strategy`] - Per-player move selection
//! - [`turn`] - One player's turn (rolls, rethrows, towers, win check)
//! - [`round`] - One full game
//! - [`simulation`] - Many games and the win tally
//! - [`config`] - Simulation parameters
//!
//! ## Example
//!
//! ```
//! use ludo_sim::config::SimulationConfig;
//! use ludo_sim::simulation::Simulation;
//!
//! let config = SimulationConfig {
//!     rounds: 5,
//!     seed: Some(7),
//!     ..SimulationConfig::default()
//! };
//! let tally = Simulation::new(config).unwrap().run().unwrap();
//! assert_eq!(tally.rounds(), 5);
//! for standing in tally.standings() {
//!     println!("Player {}: {} wins", standing.player, standing.wins);
//! }
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod dice;
pub mod moves;
pub mod position;
pub mod round;
pub mod simulation;
pub mod strategy;
pub mod turn;
