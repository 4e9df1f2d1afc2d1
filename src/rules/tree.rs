//! Per-game state: history, played moves and the current node.
//!
//! The orchestrator materialises legal moves as edges on the current node
//! before handing the tree to an evaluator; evaluators only read those edges
//! and apply one of them.

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Move, MoveList, Position};
use smallvec::SmallVec;

use crate::error::{Result, SelfPlayError};

use super::history::{PositionHistory, MAX_FULLMOVES};
use super::moves::{format_move, parse_move};
use super::opening::Opening;
use super::result::GameResult;

/// A move candidate on a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// The move, in absolute (board) coordinates.
    pub mv: Move,
}

impl Edge {
    #[must_use]
    pub fn new(mv: Move) -> Self {
        Self { mv }
    }
}

/// The node for the current position.
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// Move candidates, in legal-move generation order.
    pub edges: SmallVec<[Edge; 64]>,
}

impl Node {
    /// Replace the edges with `moves`, keeping their order.
    pub fn create_edges(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.edges.clear();
        self.edges.extend(moves.into_iter().map(Edge::new));
    }

    #[must_use]
    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }
}

/// One game: its position history, the moves played and the current node.
#[derive(Clone, Debug)]
pub struct GameTree {
    start_fen: String,
    history: PositionHistory,
    moves: Vec<Move>,
    head: Node,
}

impl GameTree {
    /// Reset to `fen` with no moves played.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let invalid = |reason: String| SelfPlayError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let setup: Fen = fen.parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = setup
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        if position.fullmoves().get() > MAX_FULLMOVES {
            return Err(invalid(format!(
                "fullmove number {} exceeds {MAX_FULLMOVES}",
                position.fullmoves()
            )));
        }

        Ok(Self {
            start_fen: fen.to_string(),
            history: PositionHistory::new(position),
            moves: Vec::new(),
            head: Node::default(),
        })
    }

    /// Reset to the opening's position and replay its forced moves.
    pub fn from_opening(opening: &Opening, ply_limit: Option<u32>) -> Result<Self> {
        let mut tree = Self::from_fen(&opening.start_fen)?;
        tree.history = tree.history.with_ply_limit(ply_limit);
        for text in &opening.moves {
            tree.make_move_str(text)?;
        }
        Ok(tree)
    }

    #[must_use]
    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    #[must_use]
    pub fn position_history(&self) -> &PositionHistory {
        &self.history
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> &Chess {
        self.history.last()
    }

    /// Game ply of the current position; its parity is the side to move.
    #[must_use]
    pub fn ply_count(&self) -> u32 {
        self.history.game_ply()
    }

    /// Moves played since the starting position, forced moves included.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn current_head(&self) -> &Node {
        &self.head
    }

    #[must_use]
    pub fn compute_game_result(&self) -> GameResult {
        self.history.compute_game_result()
    }

    /// Legal moves of the current position in generation order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.position().legal_moves()
    }

    /// Materialise `moves` as candidates on the current node.
    pub fn create_edges(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.head.create_edges(moves);
    }

    /// Play `mv`, advancing the game by one ply.
    pub fn make_move(&mut self, mv: &Move) -> Result<()> {
        if !self.position().is_legal(mv) {
            return Err(self.illegal(format_move(mv)));
        }
        self.history.append(mv);
        self.moves.push(mv.clone());
        self.head = Node::default();
        Ok(())
    }

    /// Play a move given in coordinate notation.
    pub fn make_move_str(&mut self, text: &str) -> Result<()> {
        let mv = parse_move(self.position(), text).ok_or_else(|| self.illegal(text.to_string()))?;
        self.make_move(&mv)
    }

    fn illegal(&self, mv: String) -> SelfPlayError {
        SelfPlayError::IllegalMove {
            mv,
            ply: self.ply_count(),
            start_fen: self.start_fen.clone(),
        }
    }
}
