//! Game outcome.

use serde::{Deserialize, Serialize};
use shakmaty::Color;

/// Result of one self-play game.
///
/// Starts as `Undecided` and moves to a terminal value at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Game still in progress, or stopped early by an abort.
    #[default]
    Undecided,
    WhiteWon,
    BlackWon,
    Draw,
}

impl GameResult {
    /// The result in which `color` wins.
    #[must_use]
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWon,
            Color::Black => GameResult::BlackWon,
        }
    }

    #[must_use]
    pub fn is_undecided(self) -> bool {
        self == GameResult::Undecided
    }

    /// Check if `color` won.
    #[must_use]
    pub fn is_winner(self, color: Color) -> bool {
        self == GameResult::win_for(color)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameResult::Undecided => "*",
            GameResult::WhiteWon => "1-0",
            GameResult::BlackWon => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_for() {
        assert_eq!(GameResult::win_for(Color::White), GameResult::WhiteWon);
        assert_eq!(GameResult::win_for(Color::Black), GameResult::BlackWon);
        assert!(GameResult::BlackWon.is_winner(Color::Black));
        assert!(!GameResult::BlackWon.is_winner(Color::White));
        assert!(!GameResult::Draw.is_winner(Color::White));
    }

    #[test]
    fn test_default_is_undecided() {
        assert!(GameResult::default().is_undecided());
        assert!(!GameResult::Draw.is_undecided());
    }

    #[test]
    fn test_display_uses_pgn_tokens() {
        assert_eq!(GameResult::WhiteWon.to_string(), "1-0");
        assert_eq!(GameResult::BlackWon.to_string(), "0-1");
        assert_eq!(GameResult::Draw.to_string(), "1/2-1/2");
        assert_eq!(GameResult::Undecided.to_string(), "*");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&GameResult::BlackWon).unwrap();
        let back: GameResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameResult::BlackWon);
    }
}
