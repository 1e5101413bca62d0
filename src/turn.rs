//! One player's turn.
//!
//! A turn loops over rolls:
//!
//! - roll, then evaluate every unfinished token of the player
//! - with no legal move, roll again only while every token is still in the
//!   pocket and fewer than three rolls have been made; otherwise the turn ends
//! - with a legal move, let the player's strategy pick a token and move it,
//!   together with every other own token at the same distance (a tower)
//! - a player who has finished all tokens wins and the turn ends at once
//! - a six earns another roll

use tracing::{debug, trace};

use crate::board::Board;
use crate::constants::{BONUS_ROLL, MAX_POCKET_ROLLS};
use crate::dice::Dice;
use crate::moves::{commit, evaluate_all};
use crate::position::{Player, Token, TokenId, completed_count, owned_by};
use crate::strategy::StrategyBook;

/// What happened during a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub player: Player,
    /// Every roll made, in order
    pub rolls: Vec<u32>,
    /// Tokens moved, counting each member of a tower
    pub moves: u32,
    /// Enemy tokens sent back to the pocket
    pub captures: u32,
    /// Whether the player finished all tokens this turn
    pub won: bool,
}

/// Tokens that move together with `chosen`: every token of the same owner at
/// the same distance, or just `chosen` itself while it is in the pocket.
pub fn move_group(tokens: &[Token], chosen: TokenId) -> Vec<TokenId> {
    let lead = &tokens[chosen];
    if lead.in_pocket() {
        return vec![chosen];
    }
    owned_by(tokens, lead.owner)
        .filter(|t| t.distance == lead.distance)
        .map(|t| t.id)
        .collect()
}

/// Play a full turn for `player`, mutating `tokens`.
///
/// `tokens_per_player` is the number of finished tokens needed to win.
pub fn play_turn<D: Dice>(
    board: &Board,
    tokens: &mut [Token],
    player: Player,
    tokens_per_player: u32,
    book: &StrategyBook,
    dice: &mut D,
) -> TurnReport {
    let strategy = book.for_player(player);
    let mut report = TurnReport {
        player,
        ..TurnReport::default()
    };

    loop {
        let roll = dice.roll();
        report.rolls.push(roll);

        let outcomes = evaluate_all(board, tokens, player, roll);
        for outcome in &outcomes {
            trace!(player, roll, token = outcome.token, kind = outcome.summary(), "evaluated");
        }

        let chosen = if outcomes.iter().any(|o| o.legal) {
            strategy.choose(player, &outcomes, &mut *dice)
        } else {
            None
        };

        let Some(chosen) = chosen else {
            let all_pocketed = owned_by(tokens, player).all(Token::in_pocket);
            if all_pocketed && (report.rolls.len() as u32) < MAX_POCKET_ROLLS {
                debug!(player, roll, "no legal move, rethrow");
                continue;
            }
            debug!(player, roll, "no legal move, turn over");
            break;
        };

        let group = move_group(tokens, chosen);
        debug!(player, roll, token = chosen, group = group.len(), strategy = strategy.name(), "moving");
        for id in group {
            let outcome = commit(board, tokens, id, roll);
            if outcome.legal {
                report.moves += 1;
                if outcome.captures_opponent {
                    report.captures += outcome.stack_size;
                }
            }
        }

        if completed_count(board, tokens, player) == tokens_per_player {
            debug!(player, "all tokens finished");
            report.won = true;
            break;
        }
        if roll != BONUS_ROLL {
            break;
        }
    }

    report
}
