//! Ludo-Sim command line.
//!
//! ## Usage
//!
//! - `ludo-sim` - 20 rounds, 4 players, 4 tokens each
//! - `ludo-sim -p 2 -t 2 -r 1000 --seed 1` - a reproducible run
//! - `ludo-sim -r 100000 -j 8` - spread rounds over 8 threads
//! - `ludo-sim --json` - print the standings as JSON
//! - `ludo-sim -vv` - log every turn to stderr

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ludo_sim::config::SimulationConfig;
use ludo_sim::constants::{DEFAULT_JOBS, DEFAULT_PLAYERS, DEFAULT_ROUNDS, DEFAULT_TOKENS};
use ludo_sim::simulation::{Simulation, Summary};

/// Ludo-Sim: play many games of Ludo and count the winners
#[derive(Parser)]
#[command(name = "ludo-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of players
    #[arg(short, long, default_value_t = DEFAULT_PLAYERS)]
    players: u32,

    /// Tokens per player
    #[arg(short, long, default_value_t = DEFAULT_TOKENS)]
    tokens: u32,

    /// Number of rounds (full games) to play
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    rounds: u32,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads for running rounds in parallel
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    jobs: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print which strategy each player uses and exit
    #[arg(long)]
    list_strategies: bool,

    /// Log more (-v rounds, -vv turns, -vvv every evaluated move)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            players: self.players,
            tokens: self.tokens,
            rounds: self.rounds,
            seed: self.seed,
            jobs: self.jobs,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let sim = Simulation::new(cli.config()).context("cannot start simulation")?;

    if cli.list_strategies {
        for player in 1..=cli.players {
            println!("Player {player}: {}", sim.strategies().for_player(player).name());
        }
        return Ok(());
    }

    let summary = sim.summarize().context("simulation failed")?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!(
        "Ludo-Sim: {} rounds, {} players, {} tokens each (seed {})\n",
        summary.rounds, summary.players, summary.tokens, summary.seed
    );
    for standing in &summary.standings {
        let share = standing.wins as f64 * 100.0 / summary.rounds as f64;
        println!("Player {}: {} wins ({share:.1}%)", standing.player, standing.wins);
    }
    println!();
    println!("Tied rounds: {}", summary.tied_rounds);
    println!("Stalled rounds: {}", summary.stalled_rounds);
    println!("Mean round length: {:.1} turns", summary.mean_turns);
}
