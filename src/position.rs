//! Tokens and where they stand.
//!
//! A token's `distance` is the progress it has made since leaving the pocket;
//! its [`Position`] is always the one [`Board::position_at`] derives from that
//! distance. Token ids are unique within a round and double as indices into
//! the round's token list.

use crate::board::Board;

/// A player number, `1..=players`.
pub type Player = u32;

/// Index of a token in the round's token list.
pub type TokenId = usize;

/// Where a token is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// Waiting to enter the board.
    Pocket,
    /// On the shared track, at cell `1..=track_length`.
    OnTrack(u32),
    /// Past the track. Cells in the home stretch are not addressed.
    InHomeStretch,
}

impl Position {
    pub fn cell(self) -> Option<u32> {
        match self {
            Position::OnTrack(cell) => Some(cell),
            _ => None,
        }
    }
}

/// One game piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub owner: Player,
    pub position: Position,
    /// Progress counter, `0` in the pocket up to the board's finish distance.
    pub distance: u32,
}

impl Token {
    /// A fresh token sitting in its owner's pocket.
    pub fn new(id: TokenId, owner: Player) -> Self {
        Self {
            id,
            owner,
            position: Position::Pocket,
            distance: 0,
        }
    }

    pub fn in_pocket(&self) -> bool {
        self.distance == 0
    }

    /// Move to `distance`, keeping the position consistent with it.
    pub fn place(&mut self, board: &Board, distance: u32) {
        self.distance = distance;
        self.position = board.position_at(self.owner, distance);
    }

    /// Send the token back to the pocket.
    pub fn reset(&mut self) {
        self.distance = 0;
        self.position = Position::Pocket;
    }

    /// Whether position and distance agree with each other on `board`.
    pub fn is_consistent(&self, board: &Board) -> bool {
        self.distance <= board.finish_distance()
            && self.position == board.position_at(self.owner, self.distance)
    }
}

/// Create `tokens` pocketed tokens for each of `players` players.
///
/// Tokens are grouped by owner in ascending player order, so the ids of
/// player `p` are `(p - 1) * tokens .. p * tokens`.
pub fn new_token_set(players: u32, tokens: u32) -> Vec<Token> {
    (1..=players)
        .flat_map(|owner| (0..tokens).map(move |_| owner))
        .enumerate()
        .map(|(id, owner)| Token::new(id, owner))
        .collect()
}

/// Tokens on a given track cell.
pub fn occupants(tokens: &[Token], cell: u32) -> impl Iterator<Item = &Token> {
    tokens
        .iter()
        .filter(move |t| t.position == Position::OnTrack(cell))
}

/// Tokens owned by `player`.
pub fn owned_by(tokens: &[Token], player: Player) -> impl Iterator<Item = &Token> {
    tokens.iter().filter(move |t| t.owner == player)
}

/// Number of `player`'s tokens that have reached the finish.
pub fn completed_count(board: &Board, tokens: &[Token], player: Player) -> u32 {
    owned_by(tokens, player)
        .filter(|t| board.is_finished(t.distance))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_set() {
        let tokens = new_token_set(3, 2);
        assert_eq!(tokens.len(), 6);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.id, i);
            assert!(token.in_pocket());
            assert_eq!(token.position, Position::Pocket);
        }
        let owners: Vec<_> = tokens.iter().map(|t| t.owner).collect();
        assert_eq!(owners, vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_place_and_reset() {
        let board = Board::new(4);
        let mut token = Token::new(0, 3);
        token.place(&board, 1);
        assert_eq!(token.position, Position::OnTrack(27));
        assert!(token.is_consistent(&board));

        token.place(&board, 52);
        assert_eq!(token.position, Position::InHomeStretch);

        token.reset();
        assert_eq!(token, Token::new(0, 3));
    }

    #[test]
    fn test_occupants_and_completed() {
        let board = Board::new(2);
        let mut tokens = new_token_set(2, 2);
        tokens[0].place(&board, 3);
        tokens[2].place(&board, 16); // player 2 wraps onto cell 3
        tokens[3].place(&board, board.finish_distance());

        let on_three: Vec<_> = occupants(&tokens, 3).map(|t| t.id).collect();
        assert_eq!(on_three, vec![0, 2]);
        assert_eq!(completed_count(&board, &tokens, 1), 0);
        assert_eq!(completed_count(&board, &tokens, 2), 1);
    }
}
