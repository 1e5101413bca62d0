//! Board geometry derived from the player count.
//!
//! The track is numbered `1..=track_length`. Player `p` enters the track at
//! cell `1 + 13 * (p - 1)` and travels `track_length - 1` cells around it
//! before stepping into the home stretch.

use std::fmt;

use crate::constants::{CELLS_PER_PLAYER, ENTRY_DISTANCE, HOME_STRETCH_LEN};
use crate::position::{Player, Position};

/// Track size and finishing distance for one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    players: u32,
    track_length: u32,
    finish_distance: u32,
}

impl Board {
    pub fn new(players: u32) -> Self {
        let track_length = CELLS_PER_PLAYER * players;
        Self {
            players,
            track_length,
            finish_distance: track_length + HOME_STRETCH_LEN,
        }
    }

    pub fn players(&self) -> u32 {
        self.players
    }

    /// Number of cells on the shared circular track.
    pub fn track_length(&self) -> u32 {
        self.track_length
    }

    /// Progress a token needs to finish (track plus home stretch).
    pub fn finish_distance(&self) -> u32 {
        self.finish_distance
    }

    /// Cell where `player`'s tokens enter the track. This is their home cell.
    pub fn entry_cell(&self, player: Player) -> u32 {
        1 + CELLS_PER_PLAYER * (player - 1)
    }

    /// Last track cell `player`'s tokens visit before the home stretch.
    pub fn home_entry_cell(&self, player: Player) -> u32 {
        self.cell_at(player, self.track_length - 1)
    }

    /// Track cell of a token owned by `player` that has travelled `distance`.
    ///
    /// Only meaningful for `1 <= distance < track_length`.
    pub fn cell_at(&self, player: Player, distance: u32) -> u32 {
        self.wrap(self.entry_cell(player) + distance - ENTRY_DISTANCE)
    }

    /// Position of a token owned by `player` at `distance`.
    pub fn position_at(&self, player: Player, distance: u32) -> Position {
        if distance == 0 {
            Position::Pocket
        } else if distance >= self.track_length {
            Position::InHomeStretch
        } else {
            Position::OnTrack(self.cell_at(player, distance))
        }
    }

    /// Fold any cell number `>= 1` back into `1..=track_length`.
    pub fn wrap(&self, cell: u32) -> u32 {
        (cell - 1) % self.track_length + 1
    }

    /// Whether `distance` is the terminal, finished state.
    pub fn is_finished(&self, distance: u32) -> bool {
        distance == self.finish_distance
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} players, {} track cells, finish at {}",
            self.players, self.track_length, self.finish_distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_scales_with_players() {
        for players in 1..=8 {
            let board = Board::new(players);
            assert_eq!(board.track_length(), 13 * players);
            assert_eq!(board.finish_distance(), 13 * players + 5);
        }
    }

    #[test]
    fn test_four_player_board() {
        let board = Board::new(4);
        assert_eq!(board.track_length(), 52);
        assert_eq!(board.finish_distance(), 57);
        assert_eq!(board.entry_cell(1), 1);
        assert_eq!(board.entry_cell(2), 14);
        assert_eq!(board.entry_cell(3), 27);
        assert_eq!(board.entry_cell(4), 40);
    }

    #[test]
    fn test_cell_wraps_around_track() {
        let board = Board::new(4);
        // Player 4 enters at 40; 13 steps later it has passed cell 52.
        assert_eq!(board.cell_at(4, 13), 52);
        assert_eq!(board.cell_at(4, 14), 1);
        assert_eq!(board.home_entry_cell(1), 51);
        assert_eq!(board.home_entry_cell(2), 12);
    }

    #[test]
    fn test_position_at() {
        let board = Board::new(2);
        assert_eq!(board.position_at(1, 0), Position::Pocket);
        assert_eq!(board.position_at(2, 1), Position::OnTrack(14));
        assert_eq!(board.position_at(2, 13), Position::OnTrack(26));
        assert_eq!(board.position_at(2, 14), Position::OnTrack(1));
        assert_eq!(board.position_at(1, 26), Position::InHomeStretch);
        assert_eq!(board.position_at(1, 31), Position::InHomeStretch);
    }

    #[test]
    fn test_single_player_board() {
        let board = Board::new(1);
        assert_eq!(board.track_length(), 13);
        assert_eq!(board.entry_cell(1), 1);
        assert_eq!(board.home_entry_cell(1), 12);
    }
}
