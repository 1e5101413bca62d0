//! Move resolution: legality and consequences of moving one token.
//!
//! [`evaluate`] and [`commit`] share the same rules. `evaluate` only looks at
//! the board; `commit` additionally applies a legal move, including sending
//! captured tokens back to their pocket. Illegal moves are ordinary outcomes
//! with `legal == false` and never change the board.
//!
//! The checks run in a fixed order:
//!
//! 1. finished tokens cannot move
//! 2. pocketed tokens need a six to enter at their owner's entry cell
//! 3. overshooting the finish is illegal, and a token already in the home
//!    stretch may only move with the exact finishing roll
//! 4. an enemy tower anywhere between the token and its home-stretch entry
//!    blocks it
//! 5. landing on own tokens stacks, landing on an enemy home cell is illegal,
//!    landing on any other enemy captures it
//! 6. legal moves are classified (pocket entry, finish, home stretch entry)

use tracing::{debug, trace};

use crate::board::Board;
use crate::constants::{BONUS_ROLL, ENTRY_DISTANCE};
use crate::position::{Player, Position, Token, TokenId, occupants, owned_by};

/// Result of evaluating (or committing) one token's move for one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Token the move was evaluated for
    pub token: TokenId,
    /// Whether the move may be played
    pub legal: bool,
    /// Token leaves the pocket onto its entry cell
    pub enters_from_pocket: bool,
    /// Token reaches the finish distance
    pub finishes: bool,
    /// Token leaves the track for its home stretch
    pub enters_home_stretch: bool,
    /// Token lands on its own tokens
    pub forms_stack: bool,
    /// Token lands on and captures enemy tokens
    pub captures_opponent: bool,
    /// An enemy tower stands in the way
    pub blocked_by_path: bool,
    /// Destination is an enemy token on its home cell
    pub blocked_by_enemy_home: bool,
    /// Token has already finished
    pub already_finished: bool,
    /// Size of the stack formed, or number of tokens captured
    pub stack_size: u32,
    /// Owner of the captured tokens
    pub captured_player: Option<Player>,
    /// Distance the token has after the move
    pub new_distance: u32,
    /// Position the token has after the move
    pub destination: Position,
}

impl MoveOutcome {
    /// An illegal, unclassified outcome that leaves `token` where it is.
    fn stay(token: &Token) -> Self {
        Self {
            token: token.id,
            legal: false,
            enters_from_pocket: false,
            finishes: false,
            enters_home_stretch: false,
            forms_stack: false,
            captures_opponent: false,
            blocked_by_path: false,
            blocked_by_enemy_home: false,
            already_finished: false,
            stack_size: 0,
            captured_player: None,
            new_distance: token.distance,
            destination: token.position,
        }
    }

    /// Short label for logs.
    pub fn summary(&self) -> &'static str {
        match self {
            o if o.already_finished => "already finished",
            o if o.blocked_by_path => "blocked by tower",
            o if o.blocked_by_enemy_home => "blocked by home cell",
            o if !o.legal => "illegal",
            o if o.captures_opponent => "capture",
            o if o.enters_from_pocket => "enter",
            o if o.finishes => "finish",
            o if o.enters_home_stretch => "home stretch",
            o if o.forms_stack => "stack",
            _ => "advance",
        }
    }
}

/// What is waiting on the destination cell.
enum Landing {
    Empty,
    Own(u32),
    EnemyHome,
    Enemy { owner: Player, count: u32 },
}

fn landing(token: &Token, tokens: &[Token], cell: u32) -> Landing {
    let mut own = 0;
    let mut enemy = 0;
    let mut enemy_owner = None;
    let mut enemy_home = false;
    for other in occupants(tokens, cell).filter(|t| t.id != token.id) {
        if other.owner == token.owner {
            own += 1;
        } else {
            enemy += 1;
            enemy_owner = enemy_owner.or(Some(other.owner));
            enemy_home |= other.distance == ENTRY_DISTANCE;
        }
    }
    match enemy_owner {
        None if own == 0 => Landing::Empty,
        None => Landing::Own(own),
        Some(_) if enemy_home => Landing::EnemyHome,
        Some(owner) => Landing::Enemy {
            owner,
            count: enemy,
        },
    }
}

/// Whether a cell holds a tower (two or more tokens of one player) that
/// `mover` may not pass.
fn is_enemy_tower(tokens: &[Token], cell: u32, mover: Player) -> bool {
    let mut owner = None;
    let mut count = 0;
    for t in occupants(tokens, cell) {
        if t.owner == mover || owner.is_some_and(|o| o != t.owner) {
            return false;
        }
        owner = Some(t.owner);
        count += 1;
    }
    count >= 2
}

/// Check the cells strictly between the token and its home-stretch entry
/// for enemy towers.
///
/// The home-stretch entry is always the farther end of the move along the
/// track, so towers past the destination block too. A token on or next to
/// its home-stretch entry has no cells left to pass.
fn path_blocked(board: &Board, token: &Token, tokens: &[Token], candidate: u32) -> bool {
    let last_track = board.track_length() - 1;
    if token.position.cell().is_none() || candidate <= ENTRY_DISTANCE {
        return false;
    }
    if token.distance + 2 > last_track {
        return false;
    }
    ((token.distance + 1)..last_track)
        .map(|d| board.cell_at(token.owner, d))
        .any(|cell| is_enemy_tower(tokens, cell, token.owner))
}

/// Evaluate moving `token` by `dice` without changing anything.
pub fn evaluate(board: &Board, token: &Token, tokens: &[Token], dice: u32) -> MoveOutcome {
    let mut outcome = MoveOutcome::stay(token);

    if board.is_finished(token.distance) {
        outcome.already_finished = true;
        return outcome;
    }

    let candidate = if token.in_pocket() {
        if dice != BONUS_ROLL {
            return outcome;
        }
        ENTRY_DISTANCE
    } else {
        let candidate = token.distance + dice;
        if candidate > board.finish_distance() {
            return outcome;
        }
        if token.position == Position::InHomeStretch && candidate < board.finish_distance() {
            return outcome;
        }
        candidate
    };
    outcome.new_distance = candidate;
    outcome.destination = board.position_at(token.owner, candidate);

    if path_blocked(board, token, tokens, candidate) {
        outcome.blocked_by_path = true;
        return outcome;
    }

    if let Position::OnTrack(cell) = outcome.destination {
        match landing(token, tokens, cell) {
            Landing::Empty => {}
            Landing::Own(count) => {
                outcome.forms_stack = true;
                outcome.stack_size = count + 1;
            }
            Landing::EnemyHome => {
                outcome.blocked_by_enemy_home = true;
                return outcome;
            }
            Landing::Enemy { owner, count } => {
                outcome.captures_opponent = true;
                outcome.stack_size = count;
                outcome.captured_player = Some(owner);
            }
        }
    }

    outcome.legal = true;
    if candidate == ENTRY_DISTANCE {
        outcome.enters_from_pocket = true;
    } else if candidate == board.finish_distance() {
        outcome.finishes = true;
    } else if candidate >= board.track_length() && token.position != Position::InHomeStretch {
        outcome.enters_home_stretch = true;
    }
    outcome
}

/// Evaluate and, if legal, play the move of token `id` by `dice`.
///
/// `id` must index `tokens`. Captured tokens on the destination cell are sent
/// back to their pocket.
pub fn commit(board: &Board, tokens: &mut [Token], id: TokenId, dice: u32) -> MoveOutcome {
    let outcome = evaluate(board, &tokens[id], tokens, dice);
    if !outcome.legal {
        return outcome;
    }

    let mover = tokens[id].owner;
    if let (true, Position::OnTrack(cell)) = (outcome.captures_opponent, outcome.destination) {
        for captured in tokens
            .iter_mut()
            .filter(|t| t.owner != mover && t.position == Position::OnTrack(cell))
        {
            debug!(token = captured.id, owner = captured.owner, cell, "captured");
            captured.reset();
        }
    }

    tokens[id].place(board, outcome.new_distance);
    trace!(
        token = id,
        owner = mover,
        dice,
        distance = outcome.new_distance,
        kind = outcome.summary(),
        "committed"
    );
    outcome
}

/// Evaluate every unfinished token of `player` for `dice`, in id order.
pub fn evaluate_all(board: &Board, tokens: &[Token], player: Player, dice: u32) -> Vec<MoveOutcome> {
    owned_by(tokens, player)
        .filter(|t| !board.is_finished(t.distance))
        .map(|t| evaluate(board, t, tokens, dice))
        .collect()
}
