//! Move selection strategies.
//!
//! A [`Strategy`] picks one token out of the evaluated outcomes of a roll.
//! Which strategy a player uses is looked up in a [`StrategyBook`]; players
//! without an entry fall back to the book's default.
//!
//! The built-in strategies are priority lists: the first [`Preference`] that
//! matches a legal outcome decides the move, and a uniformly random legal move
//! is played when nothing matches.

use std::collections::BTreeMap;

use crate::dice::Dice;
use crate::moves::MoveOutcome;
use crate::position::{Player, TokenId};

/// Chooses which token to move.
pub trait Strategy: Send + Sync {
    /// Name shown in logs and listings.
    fn name(&self) -> &'static str;

    /// Pick a token among the legal entries of `outcomes`.
    ///
    /// `outcomes` is in token id order. Returns `None` only when no outcome
    /// is legal.
    fn choose(&self, player: Player, outcomes: &[MoveOutcome], dice: &mut dyn Dice) -> Option<TokenId>;
}

/// A kind of move a priority strategy looks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preference {
    /// Largest capture; equal captures go to the first one found
    Capture,
    /// Bring a token out of the pocket
    Enter,
    /// Finish a token
    Finish,
    /// Join own tokens on a cell
    Stack,
    /// Move a token off the track into the home stretch
    HomeStretch,
}

impl Preference {
    fn select(self, legal: &[&MoveOutcome]) -> Option<TokenId> {
        let first = |f: fn(&MoveOutcome) -> bool| legal.iter().find(|o| f(o)).map(|o| o.token);
        match self {
            Preference::Capture => legal
                .iter()
                .copied()
                .filter(|o| o.captures_opponent)
                .fold(None::<&MoveOutcome>, |best, o| match best {
                    Some(b) if b.stack_size >= o.stack_size => Some(b),
                    _ => Some(o),
                })
                .map(|o| o.token),
            Preference::Enter => first(|o| o.enters_from_pocket),
            Preference::Finish => first(|o| o.finishes),
            Preference::Stack => first(|o| o.forms_stack),
            Preference::HomeStretch => first(|o| o.enters_home_stretch),
        }
    }
}

/// Uniformly random legal move.
fn random_legal(outcomes: &[MoveOutcome], dice: &mut dyn Dice) -> Option<TokenId> {
    let legal: Vec<_> = outcomes.iter().filter(|o| o.legal).collect();
    if legal.is_empty() {
        return None;
    }
    Some(legal[dice.pick(legal.len())].token)
}

/// Try each preference in order, then fall back to a random legal move.
#[derive(Clone, Debug)]
pub struct PriorityStrategy {
    name: &'static str,
    order: &'static [Preference],
}

impl PriorityStrategy {
    pub const AGGRESSIVE_CAPTURE: Self = Self::new(
        "aggressive-capture",
        &[
            Preference::Capture,
            Preference::Enter,
            Preference::Finish,
            Preference::Stack,
            Preference::HomeStretch,
        ],
    );

    pub const DEFENSIVE: Self = Self::new(
        "defensive",
        &[
            Preference::Enter,
            Preference::Finish,
            Preference::HomeStretch,
            Preference::Capture,
            Preference::Stack,
        ],
    );

    pub const BALANCED_AGGRESSIVE: Self = Self::new(
        "balanced-aggressive",
        &[
            Preference::Enter,
            Preference::Finish,
            Preference::Capture,
            Preference::Stack,
            Preference::HomeStretch,
        ],
    );

    pub const fn new(name: &'static str, order: &'static [Preference]) -> Self {
        Self { name, order }
    }

    pub fn order(&self) -> &[Preference] {
        self.order
    }
}

impl Strategy for PriorityStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn choose(&self, _player: Player, outcomes: &[MoveOutcome], dice: &mut dyn Dice) -> Option<TokenId> {
        let legal: Vec<_> = outcomes.iter().filter(|o| o.legal).collect();
        self.order
            .iter()
            .find_map(|pref| pref.select(&legal))
            .or_else(|| random_legal(outcomes, dice))
    }
}

/// Plays any legal move, chosen uniformly.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn choose(&self, _player: Player, outcomes: &[MoveOutcome], dice: &mut dyn Dice) -> Option<TokenId> {
        random_legal(outcomes, dice)
    }
}

/// Maps player numbers to strategies.
pub struct StrategyBook {
    by_player: BTreeMap<Player, Box<dyn Strategy>>,
    fallback: Box<dyn Strategy>,
}

impl Default for StrategyBook {
    /// Player 2 captures aggressively, player 3 plays defensively, player 4
    /// balances the two, everyone else moves at random.
    fn default() -> Self {
        Self::new(RandomStrategy)
            .with(2, PriorityStrategy::AGGRESSIVE_CAPTURE)
            .with(3, PriorityStrategy::DEFENSIVE)
            .with(4, PriorityStrategy::BALANCED_AGGRESSIVE)
    }
}

impl StrategyBook {
    /// An empty book where every player uses `fallback`.
    pub fn new(fallback: impl Strategy + 'static) -> Self {
        Self {
            by_player: BTreeMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Assign `strategy` to `player`, replacing any previous entry.
    pub fn with(mut self, player: Player, strategy: impl Strategy + 'static) -> Self {
        self.by_player.insert(player, Box::new(strategy));
        self
    }

    pub fn for_player(&self, player: Player) -> &dyn Strategy {
        self.by_player
            .get(&player)
            .map_or(self.fallback.as_ref(), |s| s.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::position::Position;

    fn outcome(token: TokenId) -> MoveOutcome {
        MoveOutcome {
            token,
            legal: true,
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
            new_distance: 2,
            destination: Position::OnTrack(2),
        }
    }

    fn capture(token: TokenId, size: u32) -> MoveOutcome {
        MoveOutcome {
            captures_opponent: true,
            stack_size: size,
            captured_player: Some(1),
            ..outcome(token)
        }
    }

    /// Outcomes covering every preference, one per token.
    fn mixed() -> Vec<MoveOutcome> {
        vec![
            MoveOutcome {
                legal: false,
                blocked_by_path: true,
                ..outcome(0)
            },
            MoveOutcome {
                forms_stack: true,
                stack_size: 2,
                ..outcome(1)
            },
            MoveOutcome {
                enters_home_stretch: true,
                ..outcome(2)
            },
            capture(3, 1),
            MoveOutcome {
                finishes: true,
                ..outcome(4)
            },
            MoveOutcome {
                enters_from_pocket: true,
                ..outcome(5)
            },
            capture(6, 2),
        ]
    }

    fn choose(strategy: &dyn Strategy, outcomes: &[MoveOutcome]) -> Option<TokenId> {
        strategy.choose(1, outcomes, &mut ScriptedDice::default())
    }

    #[test]
    fn test_aggressive_prefers_largest_capture() {
        assert_eq!(choose(&PriorityStrategy::AGGRESSIVE_CAPTURE, &mixed()), Some(6));
    }

    #[test]
    fn test_capture_ties_go_to_first() {
        let outcomes = vec![outcome(0), capture(1, 2), capture(2, 2), capture(3, 1)];
        assert_eq!(choose(&PriorityStrategy::AGGRESSIVE_CAPTURE, &outcomes), Some(1));
    }

    #[test]
    fn test_defensive_order() {
        let strategy = PriorityStrategy::DEFENSIVE;
        let mut outcomes = mixed();
        assert_eq!(choose(&strategy, &outcomes), Some(5));
        outcomes.retain(|o| o.token != 5);
        assert_eq!(choose(&strategy, &outcomes), Some(4));
        outcomes.retain(|o| o.token != 4);
        assert_eq!(choose(&strategy, &outcomes), Some(2));
        outcomes.retain(|o| o.token != 2);
        assert_eq!(choose(&strategy, &outcomes), Some(6));
    }

    #[test]
    fn test_balanced_order() {
        let strategy = PriorityStrategy::BALANCED_AGGRESSIVE;
        let mut outcomes = mixed();
        outcomes.retain(|o| o.token != 5 && o.token != 4);
        assert_eq!(choose(&strategy, &outcomes), Some(6));
        outcomes.retain(|o| !o.captures_opponent);
        assert_eq!(choose(&strategy, &outcomes), Some(1));
    }

    #[test]
    fn test_illegal_outcomes_never_chosen() {
        let outcomes = vec![
            MoveOutcome {
                legal: false,
                ..capture(0, 3)
            },
            outcome(1),
        ];
        assert_eq!(choose(&PriorityStrategy::AGGRESSIVE_CAPTURE, &outcomes), Some(1));
        assert_eq!(choose(&RandomStrategy, &outcomes), Some(1));
    }

    #[test]
    fn test_random_uses_dice() {
        let outcomes = vec![outcome(0), outcome(1), outcome(2)];
        let mut dice = ScriptedDice::default().with_picks([2, 1]);
        assert_eq!(RandomStrategy.choose(1, &outcomes, &mut dice), Some(2));
        assert_eq!(RandomStrategy.choose(1, &outcomes, &mut dice), Some(1));
    }

    #[test]
    fn test_no_legal_move() {
        let outcomes = vec![MoveOutcome {
            legal: false,
            ..outcome(0)
        }];
        assert_eq!(choose(&RandomStrategy, &outcomes), None);
        assert_eq!(choose(&PriorityStrategy::DEFENSIVE, &outcomes), None);
    }

    #[test]
    fn test_default_book() {
        let book = StrategyBook::default();
        assert_eq!(book.for_player(1).name(), "baseline");
        assert_eq!(book.for_player(2).name(), "aggressive-capture");
        assert_eq!(book.for_player(3).name(), "defensive");
        assert_eq!(book.for_player(4).name(), "balanced-aggressive");
        assert_eq!(book.for_player(9).name(), "baseline");
    }

    #[test]
    fn test_book_override() {
        let book = StrategyBook::default().with(1, PriorityStrategy::DEFENSIVE);
        assert_eq!(book.for_player(1).name(), "defensive");
    }
}
