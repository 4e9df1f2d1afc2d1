//! Batch evaluators: turn a batch of game trees into one move per tree.
//!
//! Every iteration of the self-play loop drives an evaluator through four
//! phases, always in this order:
//!
//! 1. `reset` with the options of the side due to move
//! 2. `gather` once per due game
//! 3. `run` exactly once
//! 4. `make_best_move` once per gathered game, in gather order
//!
//! `gather` hands out a [`BatchSlot`] that must be given back to
//! `make_best_move`, so a caller that reorders games is caught instead of
//! silently receiving another game's move.

use std::sync::Arc;

use crate::error::{Result, SelfPlayError};
use crate::nn::{encode_position_for_nn, FillEmptyHistory, InputFormat, NetworkComputation, PolicyNetwork};
use crate::rules::{nn_index, GameTree, Transform};

/// Per-side options: the network that plays this side.
#[derive(Clone)]
pub struct PlayerOptions {
    pub network: Arc<dyn PolicyNetwork>,
}

impl PlayerOptions {
    pub fn new(network: Arc<dyn PolicyNetwork>) -> Self {
        Self { network }
    }

    /// Input format declared by the network.
    #[must_use]
    pub fn input_format(&self) -> InputFormat {
        self.network.capabilities().input_format
    }
}

impl std::fmt::Debug for PlayerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerOptions")
            .field("input_format", &self.input_format())
            .finish_non_exhaustive()
    }
}

/// Position of a gathered game within the current batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchSlot(usize);

impl BatchSlot {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A move-selection policy over whole batches.
pub trait Evaluator {
    /// Start a new batch for `player`, discarding the previous one.
    fn reset(&mut self, player: &PlayerOptions);

    /// Record `tree`'s current position. The tree's head already carries its
    /// legal moves as edges.
    fn gather(&mut self, tree: &GameTree) -> Result<BatchSlot>;

    /// Evaluate everything gathered since `reset`.
    fn run(&mut self) -> Result<()>;

    /// Apply exactly one move to the tree gathered as `slot`.
    fn make_best_move(&mut self, tree: &mut GameTree, slot: BatchSlot) -> Result<()>;
}

/// Index of the highest score.
///
/// On ties the later candidate wins. A NaN never displaces a number.
#[must_use]
pub fn best_index(scores: impl IntoIterator<Item = f32>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, score) in scores.into_iter().enumerate() {
        match best {
            Some((_, max)) if !(score >= max || max.is_nan()) => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Greedy one-ply policy: play the move the network scores highest.
#[derive(Debug)]
pub struct PolicyEvaluator {
    history_depth: usize,
    fill: FillEmptyHistory,
    comp: Option<NetworkComputation>,
    input_format: InputFormat,
    transforms: Vec<Transform>,
    comp_idx: usize,
}

impl Default for PolicyEvaluator {
    fn default() -> Self {
        Self::new(8, FillEmptyHistory::FenOnly)
    }
}

impl PolicyEvaluator {
    /// Create an evaluator encoding `history_depth` positions per input.
    pub fn new(history_depth: usize, fill: FillEmptyHistory) -> Self {
        Self {
            history_depth,
            fill,
            comp: None,
            input_format: InputFormat::default(),
            transforms: Vec::new(),
            comp_idx: 0,
        }
    }

    /// Number of positions gathered into the current batch.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.transforms.len()
    }
}

impl Evaluator for PolicyEvaluator {
    fn reset(&mut self, player: &PlayerOptions) {
        self.comp = Some(NetworkComputation::new(Arc::clone(&player.network)));
        self.input_format = player.input_format();
        self.transforms.clear();
        self.comp_idx = 0;
    }

    fn gather(&mut self, tree: &GameTree) -> Result<BatchSlot> {
        let comp = self.comp.as_mut().ok_or(SelfPlayError::NotReset)?;
        let (planes, transform) = encode_position_for_nn(
            self.input_format,
            tree.position_history(),
            self.history_depth,
            self.fill,
        );
        self.transforms.push(transform);
        comp.add_input(planes);
        Ok(BatchSlot(self.transforms.len() - 1))
    }

    fn run(&mut self) -> Result<()> {
        self.comp
            .as_mut()
            .ok_or(SelfPlayError::NotReset)?
            .compute_blocking()
    }

    fn make_best_move(&mut self, tree: &mut GameTree, slot: BatchSlot) -> Result<()> {
        let comp = self.comp.as_ref().ok_or(SelfPlayError::NotReset)?;
        if slot.0 != self.comp_idx || slot.0 >= self.transforms.len() {
            return Err(SelfPlayError::SlotOutOfOrder {
                expected: self.comp_idx,
                got: slot.0,
            });
        }
        if !comp.is_computed() {
            return Err(SelfPlayError::NotComputed);
        }

        let transform = self.transforms[self.comp_idx];
        let black_to_move = tree.position_history().is_black_to_move();
        let edges = &tree.current_head().edges;

        let scores = edges
            .iter()
            .map(|edge| {
                let index = nn_index(&edge.mv, black_to_move, transform);
                comp.p_val(self.comp_idx, index)
                    .ok_or(SelfPlayError::PolicyIndexOutOfRange {
                        index,
                        size: comp.policy_len(self.comp_idx),
                    })
            })
            .collect::<Result<Vec<f32>>>()?;

        let best = best_index(scores).ok_or(SelfPlayError::NoCandidates)?;
        let mv = edges[best].mv.clone();
        tree.make_move(&mv)?;
        self.comp_idx += 1;
        Ok(())
    }
}
