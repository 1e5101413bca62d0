//! A single game, from all tokens pocketed to the first finished player(s).
//!
//! Every player takes a turn in ascending order. The round ends after the
//! first full turn in which somebody finished, and players after the winner
//! still get their turn, so one round can have several winners.
//!
//! Enemy towers can block each other for good: when no player has a legal
//! move for any dice value, nothing can change any more and the round ends
//! as a stalemate without winners.

use tracing::{debug, info};

use crate::board::Board;
use crate::constants::DICE_SIDES;
use crate::dice::Dice;
use crate::moves::evaluate_all;
use crate::position::{Player, Token, new_token_set};
use crate::strategy::StrategyBook;
use crate::turn::play_turn;

/// Winners of a finished round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResult {
    /// Players who finished during the last turn, in player order; empty
    /// after a stalemate
    pub winners: Vec<Player>,
    /// Number of turns played
    pub turns: u32,
}

impl RoundResult {
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }

    pub fn is_stalled(&self) -> bool {
        self.winners.is_empty()
    }
}

/// Board state of one round in progress.
pub struct Round<'a> {
    board: Board,
    tokens: Vec<Token>,
    tokens_per_player: u32,
    book: &'a StrategyBook,
    turn: u32,
    winners: Vec<Player>,
    stalled: bool,
}

impl<'a> Round<'a> {
    /// Fresh round with every token in its owner's pocket.
    ///
    /// # Panics
    ///
    /// Panics if `players` or `tokens_per_player` is zero. Such a round has
    /// nobody who could ever win.
    pub fn new(players: u32, tokens_per_player: u32, book: &'a StrategyBook) -> Self {
        assert!(players > 0, "a round needs at least one player");
        assert!(tokens_per_player > 0, "a round needs at least one token per player");
        Self {
            board: Board::new(players),
            tokens: new_token_set(players, tokens_per_player),
            tokens_per_player,
            book,
            turn: 0,
            winners: Vec::new(),
            stalled: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn winners(&self) -> &[Player] {
        &self.winners
    }

    /// Whether the round ended because nobody can move any more.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn is_over(&self) -> bool {
        self.stalled || !self.winners.is_empty()
    }

    /// No player has a legal move for any dice value.
    fn is_stalemate(&self) -> bool {
        (1..=self.board.players()).all(|player| {
            (1..=DICE_SIDES).all(|dice| {
                evaluate_all(&self.board, &self.tokens, player, dice)
                    .iter()
                    .all(|outcome| !outcome.legal)
            })
        })
    }

    /// Let every player act once. Returns `true` once the round is over.
    pub fn play_turn<D: Dice>(&mut self, dice: &mut D) -> bool {
        if self.is_over() {
            return true;
        }
        self.turn += 1;
        let mut moves = 0;
        for player in 1..=self.board.players() {
            let report = play_turn(
                &self.board,
                &mut self.tokens,
                player,
                self.tokens_per_player,
                self.book,
                dice,
            );
            moves += report.moves;
            if report.won {
                self.winners.push(player);
            }
        }
        if moves == 0 && self.winners.is_empty() && self.is_stalemate() {
            info!(turn = self.turn, "stalemate, nobody can move");
            self.stalled = true;
        }
        debug!(turn = self.turn, winners = ?self.winners, "turn complete");
        self.is_over()
    }

    /// Play until somebody wins or nobody can move.
    pub fn play<D: Dice>(mut self, dice: &mut D) -> RoundResult {
        while !self.play_turn(dice) {}
        info!(turns = self.turn, winners = ?self.winners, "round over");
        RoundResult {
            winners: self.winners,
            turns: self.turn,
        }
    }
}
