//! Opening descriptors used to seed self-play games.

use serde::{Deserialize, Serialize};

/// FEN of the standard initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A starting position plus a forced move sequence replayed before play.
///
/// ## Example
///
/// ```
/// use batch_selfplay::rules::Opening;
///
/// let opening = Opening::startpos().with_moves(["e2e4", "c7c5"]);
/// assert_eq!(opening.moves.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opening {
    /// Starting position in FEN.
    pub start_fen: String,

    /// Forced moves in coordinate notation (`e2e4`, `e7e8q`, `e1g1`).
    #[serde(default)]
    pub moves: Vec<String>,
}

impl Opening {
    /// Create an opening from a FEN and forced moves.
    pub fn new(start_fen: impl Into<String>, moves: Vec<String>) -> Self {
        Self {
            start_fen: start_fen.into(),
            moves,
        }
    }

    /// The standard initial position with no forced moves.
    #[must_use]
    pub fn startpos() -> Self {
        Self::new(STARTING_FEN, Vec::new())
    }

    /// A position given as FEN with no forced moves.
    pub fn from_fen(fen: impl Into<String>) -> Self {
        Self::new(fen, Vec::new())
    }

    /// Replace the forced move sequence.
    #[must_use]
    pub fn with_moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for Opening {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos() {
        let opening = Opening::startpos();
        assert_eq!(opening.start_fen, STARTING_FEN);
        assert!(opening.moves.is_empty());
        assert_eq!(Opening::default(), opening);
    }

    #[test]
    fn test_deserialize_without_moves() {
        let json = format!(r#"{{"start_fen": "{STARTING_FEN}"}}"#);
        let opening: Opening = serde_json::from_str(&json).unwrap();
        assert_eq!(opening, Opening::startpos());
    }

    #[test]
    fn test_with_moves() {
        let opening = Opening::from_fen(STARTING_FEN).with_moves(vec!["d2d4".to_string()]);
        assert_eq!(opening.moves, vec!["d2d4"]);
    }
}
