//! Lock-step batched self-play.
//!
//! Many independent games advance together. Every iteration resolves games
//! that ended (by the rules or by the endgame database), then collects one
//! position from every undecided game whose side to move is due and
//! evaluates them as a single batch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::error::Result;
use crate::nn::FillEmptyHistory;
use crate::rules::{GameResult, GameTree, Opening};
use crate::tablebase::{resolve_wdl, EndgameTablebase};

use super::evaluator::{Evaluator, PlayerOptions, PolicyEvaluator};

/// Configuration for self-play.
#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    /// Number of positions encoded per network input.
    pub history_depth: usize,

    /// How history slots before the start of the game are filled.
    pub fill_empty_history: FillEmptyHistory,

    /// Adjudicate a draw after this many plies (forced moves included).
    /// `None` = play until the rules end the game.
    pub max_plies: Option<u32>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            history_depth: 8,
            fill_empty_history: FillEmptyHistory::FenOnly,
            max_plies: None,
        }
    }
}

impl SelfPlayConfig {
    /// Create a new self-play config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history depth of network inputs.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    /// Set how empty history slots are filled.
    pub fn with_fill_empty_history(mut self, fill: FillEmptyHistory) -> Self {
        self.fill_empty_history = fill;
        self
    }

    /// Set the ply limit.
    pub fn with_max_plies(mut self, max: u32) -> Self {
        self.max_plies = Some(max);
        self
    }

    /// Build the default evaluator for this config.
    pub fn policy_evaluator(&self) -> PolicyEvaluator {
        PolicyEvaluator::new(self.history_depth, self.fill_empty_history)
    }
}

/// Cloneable handle that stops a running [`MultiGameSelfPlay::play`].
///
/// The flag is checked once per iteration, so the batch in progress always
/// completes.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One game and its result.
#[derive(Clone, Debug)]
pub struct GameSession {
    tree: GameTree,
    result: GameResult,
}

impl GameSession {
    fn new(tree: GameTree) -> Self {
        Self {
            tree,
            result: GameResult::Undecided,
        }
    }

    #[must_use]
    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[must_use]
    pub fn is_undecided(&self) -> bool {
        self.result.is_undecided()
    }

    /// Record the final result. A decided result is never overwritten.
    fn set_result(&mut self, result: GameResult) -> bool {
        if !self.result.is_undecided() || result.is_undecided() {
            return false;
        }
        self.result = result;
        true
    }

    /// Index into the per-side options: 0 on even plies, 1 on odd.
    fn side_index(&self) -> usize {
        (self.tree.ply_count() % 2) as usize
    }
}

/// Tally of results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelfPlaySummary {
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub undecided: usize,
}

impl SelfPlaySummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.white_wins + self.black_wins + self.draws + self.undecided
    }
}

/// Plays a fixed set of games in lock-step, one batch per iteration.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use batch_selfplay::nn::RandomPolicy;
/// use batch_selfplay::rules::Opening;
/// use batch_selfplay::training::{MultiGameSelfPlay, PlayerOptions, SelfPlayConfig};
///
/// let player = PlayerOptions::new(Arc::new(RandomPolicy::new(1)));
/// let openings = vec![Opening::startpos(); 4];
/// let config = SelfPlayConfig::default().with_max_plies(20);
///
/// let mut games =
///     MultiGameSelfPlay::new(player.clone(), player, &openings, None, config).unwrap();
/// games.play().unwrap();
/// assert!(games.results().iter().all(|r| !r.is_undecided()));
/// ```
pub struct MultiGameSelfPlay {
    options: [PlayerOptions; 2],
    sessions: Vec<GameSession>,
    tablebase: Option<Arc<dyn EndgameTablebase>>,
    abort: AbortHandle,
    config: SelfPlayConfig,
    iterations: usize,
}

impl MultiGameSelfPlay {
    /// Set up one game per opening.
    ///
    /// `first` plays the positions with an even ply count, `second` the odd
    /// ones. Fails if any opening has an invalid FEN or an illegal forced
    /// move; no games are created in that case.
    pub fn new(
        first: PlayerOptions,
        second: PlayerOptions,
        openings: &[Opening],
        tablebase: Option<Arc<dyn EndgameTablebase>>,
        config: SelfPlayConfig,
    ) -> Result<Self> {
        let sessions = openings
            .iter()
            .map(|opening| GameTree::from_opening(opening, config.max_plies).map(GameSession::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            options: [first, second],
            sessions,
            tablebase,
            abort: AbortHandle::default(),
            config,
            iterations: 0,
        })
    }

    /// Ask a running `play` to stop at the next iteration boundary.
    pub fn abort(&self) {
        self.abort.abort();
    }

    /// Handle for aborting from another thread.
    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Play with the greedy [`PolicyEvaluator`].
    pub fn play(&mut self) -> Result<()> {
        let mut evaluator = self.config.policy_evaluator();
        self.play_with(&mut evaluator)
    }

    /// Play until every game is decided or an abort is requested.
    ///
    /// Returning after an abort is not an error; the games still running
    /// keep `GameResult::Undecided`.
    pub fn play_with<E: Evaluator + ?Sized>(&mut self, evaluator: &mut E) -> Result<()> {
        loop {
            if self.abort.is_aborted() {
                info!(iterations = self.iterations, summary = ?self.summary(), "self-play aborted");
                return Ok(());
            }

            self.resolve_finished_games();

            let Some(side) = self.due_side() else {
                info!(iterations = self.iterations, summary = ?self.summary(), "self-play finished");
                return Ok(());
            };

            evaluator.reset(&self.options[side]);

            let mut slots = Vec::new();
            for (i, session) in self.sessions.iter_mut().enumerate() {
                if !session.is_undecided() || session.side_index() != side {
                    continue;
                }
                let legal_moves = session.tree.legal_moves();
                session.tree.create_edges(legal_moves);
                slots.push((i, evaluator.gather(&session.tree)?));
            }

            debug!(iteration = self.iterations, side, batch = slots.len(), "running batch");
            evaluator.run()?;

            for (i, slot) in slots {
                evaluator.make_best_move(&mut self.sessions[i].tree, slot)?;
            }
            self.iterations += 1;
        }
    }

    /// Record results for games that ended by the rules or that the endgame
    /// database can classify.
    fn resolve_finished_games(&mut self) {
        let tablebase = self.tablebase.as_deref();
        for (i, session) in self.sessions.iter_mut().enumerate() {
            if !session.is_undecided() {
                continue;
            }

            let result = session.tree.compute_game_result();
            if session.set_result(result) {
                trace!(game = i, %result, plies = session.tree.moves().len(), "game over");
                continue;
            }

            if let Some(result) = tablebase.and_then(|tb| probe(tb, &session.tree)) {
                session.set_result(result);
                trace!(game = i, %result, "resolved by tablebase");
            }
        }
    }

    /// Side to move of the first undecided game, `None` when all are done.
    fn due_side(&self) -> Option<usize> {
        self.sessions
            .iter()
            .find(|s| s.is_undecided())
            .map(GameSession::side_index)
    }

    /// Final or current results, one per opening, in construction order.
    #[must_use]
    pub fn results(&self) -> Vec<GameResult> {
        self.sessions.iter().map(GameSession::result).collect()
    }

    #[must_use]
    pub fn result(&self, index: usize) -> Option<GameResult> {
        self.sessions.get(index).map(GameSession::result)
    }

    #[must_use]
    pub fn sessions(&self) -> &[GameSession] {
        &self.sessions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Batches evaluated so far.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    #[must_use]
    pub fn summary(&self) -> SelfPlaySummary {
        let mut summary = SelfPlaySummary::default();
        for session in &self.sessions {
            match session.result {
                GameResult::WhiteWon => summary.white_wins += 1,
                GameResult::BlackWon => summary.black_wins += 1,
                GameResult::Draw => summary.draws += 1,
                GameResult::Undecided => summary.undecided += 1,
            }
        }
        summary
    }
}

/// Tablebase result for `tree`, if it is in range and the probe succeeds.
fn probe(tablebase: &dyn EndgameTablebase, tree: &GameTree) -> Option<GameResult> {
    let history = tree.position_history();
    if history.has_castling_rights() || history.piece_count() > tablebase.max_cardinality() {
        return None;
    }
    let black_to_move = tree.ply_count() % 2 == 1;
    tablebase
        .probe_wdl(tree.position())
        .wdl()
        .map(|wdl| resolve_wdl(wdl, black_to_move))
}

impl std::fmt::Debug for MultiGameSelfPlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiGameSelfPlay")
            .field("games", &self.sessions.len())
            .field("tablebase", &self.tablebase.is_some())
            .field("iterations", &self.iterations)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
