//! Position history of a single game.
//!
//! Stores every position reached since the starting position, together with
//! how often each position had already occurred. Terminal-result detection
//! lives here because it needs the whole history (50-move rule, repetition,
//! ply limit), not just the current board.

use shakmaty::{Chess, Color, EnPassantMode, Move, Position};

use super::result::GameResult;

/// Halfmove clock value at which the 50-move rule ends the game.
const FIFTY_MOVE_PLIES: u32 = 100;

/// Largest starting fullmove number accepted; keeps [`PositionHistory::game_ply`]
/// within `u32` for any game that could actually be played from it.
pub const MAX_FULLMOVES: u32 = u32::MAX / 4;

#[derive(Clone, Debug)]
struct HistoryEntry {
    position: Chess,
    /// Number of earlier occurrences of this position.
    repetitions: u32,
}

/// Every position of a game, oldest first.
///
/// Never empty: the starting position is always present.
#[derive(Clone, Debug)]
pub struct PositionHistory {
    entries: Vec<HistoryEntry>,
    ply_limit: Option<u32>,
}

/// Positions count as repeated when board, side to move, castling rights and
/// the legal en passant square all match.
fn same_position(a: &Chess, b: &Chess) -> bool {
    a.turn() == b.turn()
        && a.board() == b.board()
        && a.castles().castling_rights() == b.castles().castling_rights()
        && a.ep_square(EnPassantMode::Legal) == b.ep_square(EnPassantMode::Legal)
}

impl PositionHistory {
    /// Create a history containing only `start`.
    #[must_use]
    pub fn new(start: Chess) -> Self {
        Self {
            entries: vec![HistoryEntry {
                position: start,
                repetitions: 0,
            }],
            ply_limit: None,
        }
    }

    /// Adjudicate a draw once this many plies have been played.
    #[must_use]
    pub fn with_ply_limit(mut self, limit: Option<u32>) -> Self {
        self.ply_limit = limit;
        self
    }

    #[must_use]
    pub fn ply_limit(&self) -> Option<u32> {
        self.ply_limit
    }

    /// The position the game started from.
    #[must_use]
    pub fn starting(&self) -> &Chess {
        &self.entries[0].position
    }

    /// The current position.
    #[must_use]
    pub fn last(&self) -> &Chess {
        &self.entries[self.entries.len() - 1].position
    }

    /// Number of positions, including the starting one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plies played since the starting position.
    #[must_use]
    pub fn plies_played(&self) -> u32 {
        (self.entries.len() - 1) as u32
    }

    /// All positions, oldest first.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = &Chess> + '_ {
        self.entries.iter().map(|e| &e.position)
    }

    /// Up to `depth` most recent positions with their repetition counts,
    /// newest first.
    pub fn recent(&self, depth: usize) -> impl Iterator<Item = (&Chess, u32)> + '_ {
        self.entries
            .iter()
            .rev()
            .take(depth)
            .map(|e| (&e.position, e.repetitions))
    }

    /// How often the current position occurred before.
    #[must_use]
    pub fn last_repetitions(&self) -> u32 {
        self.entries[self.entries.len() - 1].repetitions
    }

    /// Ply number of the current position, counted from the start of the
    /// game as recorded in the starting FEN's move counters.
    ///
    /// Even when white is to move, odd when black is.
    #[must_use]
    pub fn game_ply(&self) -> u32 {
        let pos = self.last();
        let fullmoves = pos.fullmoves().get();
        2 * (fullmoves - 1) + u32::from(pos.turn() == Color::Black)
    }

    #[must_use]
    pub fn is_black_to_move(&self) -> bool {
        self.last().turn() == Color::Black
    }

    /// Number of pieces on the board, kings included.
    #[must_use]
    pub fn piece_count(&self) -> u32 {
        self.last().board().occupied().count() as u32
    }

    /// Whether either side still holds any castling right.
    #[must_use]
    pub fn has_castling_rights(&self) -> bool {
        !self.last().castles().castling_rights().is_empty()
    }

    /// Play `mv` from the current position.
    ///
    /// The move is not checked for legality; callers go through
    /// `GameTree::make_move`, which does.
    pub fn append(&mut self, mv: &Move) {
        let mut position = self.last().clone();
        position.play_unchecked(mv);
        let repetitions = self.count_repetitions(&position);
        self.entries.push(HistoryEntry {
            position,
            repetitions,
        });
    }

    /// Repetitions of `position` if it were appended now.
    ///
    /// Only positions after the last irreversible move can repeat, and only
    /// every second ply has the same side to move.
    fn count_repetitions(&self, position: &Chess) -> u32 {
        let len = self.entries.len();
        let window = position.halfmoves() as usize;
        let mut back = 2;
        while back <= window && back <= len {
            let earlier = &self.entries[len - back];
            if same_position(&earlier.position, position) {
                return earlier.repetitions + 1;
            }
            back += 2;
        }
        0
    }

    /// Result implied by the rules of chess for the current position.
    ///
    /// Checkmate and stalemate take precedence over the draw rules, the ply
    /// limit is checked last.
    #[must_use]
    pub fn compute_game_result(&self) -> GameResult {
        let pos = self.last();

        if pos.legal_moves().is_empty() {
            return if pos.is_check() {
                GameResult::win_for(!pos.turn())
            } else {
                GameResult::Draw
            };
        }

        if pos.is_insufficient_material()
            || pos.halfmoves() >= FIFTY_MOVE_PLIES
            || self.last_repetitions() >= 2
        {
            return GameResult::Draw;
        }

        match self.ply_limit {
            Some(limit) if self.plies_played() >= limit => GameResult::Draw,
            _ => GameResult::Undecided,
        }
    }
}
