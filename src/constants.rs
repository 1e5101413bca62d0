//! Constants for board geometry, turn rules, and simulation defaults.
//!
//! The board is a shared circular track whose length scales with the number
//! of players, followed by a short private home stretch per player.
//! Everything geometric is derived from these numbers by [`crate::board`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Track cells contributed by each player (one quarter of a classic board).
pub const CELLS_PER_PLAYER: u32 = 13;

/// Length of the private home stretch after a token leaves the track.
pub const HOME_STRETCH_LEN: u32 = 5;

/// Distance of a token standing on its own entry cell.
///
/// Tokens at this distance are immune to capture.
pub const ENTRY_DISTANCE: u32 = 1;

// =============================================================================
// Dice and Turn Rules
// =============================================================================

/// Number of faces on the die.
pub const DICE_SIDES: u32 = 6;

/// Roll that lets a token leave the pocket and grants another roll.
pub const BONUS_ROLL: u32 = 6;

/// Maximum rolls in one turn while every token is still in the pocket.
pub const MAX_POCKET_ROLLS: u32 = 3;

// =============================================================================
// Simulation Defaults
// =============================================================================

/// Default number of players.
pub const DEFAULT_PLAYERS: u32 = 4;

/// Default number of tokens per player.
pub const DEFAULT_TOKENS: u32 = 4;

/// Default number of rounds (full games) to simulate.
pub const DEFAULT_ROUNDS: u32 = 20;

/// Default worker count (1 = run rounds sequentially on the caller's thread).
pub const DEFAULT_JOBS: usize = 1;
