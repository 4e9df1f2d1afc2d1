//! Neural network traits for policy prediction.
//!
//! These traits define the interface between the self-play driver and the
//! predictive model. The driver only ever needs per-move preference scores;
//! how a network computes them (device, precision, queueing) is its own
//! business.

use std::hash::Hasher;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::rules::POLICY_SIZE;

/// Encoded game state as a flat tensor for neural network input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor (e.g., [planes, height, width]).
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled encoded state with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Set element at a flat index.
    pub fn set(&mut self, index: usize, value: f32) {
        if index < self.tensor.len() {
            self.tensor[index] = value;
        }
    }
}

/// Input representation a network was trained on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputFormat {
    /// Mover-relative planes, never transformed.
    #[default]
    Classical,
    /// Mover-relative planes, canonicalised by a board symmetry once
    /// castling is no longer possible.
    Canonical,
}

/// What a network declares about itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCapabilities {
    pub input_format: InputFormat,
}

/// Policy network outputs per-move preference scores.
///
/// Given an encoded state, returns one score per policy index
/// (see [`crate::rules::nn_index`]). Scores need not be normalised; only their
/// order matters to the driver.
pub trait PolicyNetwork: Send + Sync {
    /// Declared capabilities, read once per batch.
    fn capabilities(&self) -> NetworkCapabilities {
        NetworkCapabilities::default()
    }

    /// Predict move scores for the given state.
    fn predict(&self, encoded: &EncodedState) -> Vec<f32>;

    /// Batch prediction for multiple states.
    ///
    /// Must return exactly one row per input, in input order.
    fn predict_batch(&self, encoded: &[EncodedState]) -> Vec<Vec<f32>> {
        encoded.iter().map(|e| self.predict(e)).collect()
    }
}

/// Uniform policy (baseline for testing).
#[derive(Clone, Debug, Default)]
pub struct UniformPolicy {
    format: InputFormat,
}

impl UniformPolicy {
    /// Create a new uniform policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a different input format.
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }
}

impl PolicyNetwork for UniformPolicy {
    fn capabilities(&self) -> NetworkCapabilities {
        NetworkCapabilities {
            input_format: self.format,
        }
    }

    fn predict(&self, _encoded: &EncodedState) -> Vec<f32> {
        vec![1.0 / POLICY_SIZE as f32; POLICY_SIZE]
    }
}

/// Pseudo-random policy.
///
/// Scores are drawn from ChaCha8 seeded by an FxHash of the network seed and
/// the input tensor, so identical inputs always get identical scores.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy {
    seed: u64,
    format: InputFormat,
}

impl RandomPolicy {
    /// Create a new random policy.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            format: InputFormat::default(),
        }
    }

    /// Declare a different input format.
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    fn input_seed(&self, encoded: &EncodedState) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        for value in &encoded.tensor {
            hasher.write_u32(value.to_bits());
        }
        hasher.finish()
    }
}

impl PolicyNetwork for RandomPolicy {
    fn capabilities(&self) -> NetworkCapabilities {
        NetworkCapabilities {
            input_format: self.format,
        }
    }

    fn predict(&self, encoded: &EncodedState) -> Vec<f32> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.input_seed(encoded));
        (0..POLICY_SIZE).map(|_| rng.gen::<f32>()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_state_new() {
        let state = EncodedState::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        assert_eq!(state.len(), 4);
        assert_eq!(state.shape, vec![2, 2]);
        assert_eq!(state.get(0), Some(1.0));
        assert_eq!(state.get(3), Some(4.0));
        assert_eq!(state.get(4), None);
    }

    #[test]
    fn test_encoded_state_set_out_of_bounds() {
        let mut state = EncodedState::zeros(vec![3]);
        state.set(10, 5.0); // Out of bounds, should be ignored
        assert!(state.tensor.iter().all(|&v| v == 0.0));
        state.set(1, 2.0);
        assert_eq!(state.tensor, vec![0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_uniform_policy() {
        let policy = UniformPolicy::new();
        let probs = policy.predict(&EncodedState::zeros(vec![4]));

        assert_eq!(probs.len(), POLICY_SIZE);
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 0.01);
        assert_eq!(policy.capabilities().input_format, InputFormat::Classical);
    }

    #[test]
    fn test_random_policy_is_deterministic_per_input() {
        let policy = RandomPolicy::new(7);
        let a = EncodedState::new(vec![1.0, 0.0], vec![2]);
        let b = EncodedState::new(vec![0.0, 1.0], vec![2]);

        assert_eq!(policy.predict(&a), policy.predict(&a));
        assert_ne!(policy.predict(&a), policy.predict(&b));
        assert_ne!(policy.predict(&a), RandomPolicy::new(8).predict(&a));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_input_seed_is_pinned() {
        let policy = RandomPolicy::new(7);
        let state = EncodedState::new(vec![1.0, 0.0], vec![2]);
        assert_eq!(policy.input_seed(&state), 0x35f9_1ad8_71c0_97f3);
    }

    #[test]
    fn test_predict_batch_keeps_order() {
        let policy = RandomPolicy::new(1).with_input_format(InputFormat::Canonical);
        let inputs = vec![
            EncodedState::new(vec![1.0], vec![1]),
            EncodedState::new(vec![2.0], vec![1]),
        ];
        let batch = policy.predict_batch(&inputs);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], policy.predict(&inputs[0]));
        assert_eq!(batch[1], policy.predict(&inputs[1]));
        assert_eq!(policy.capabilities().input_format, InputFormat::Canonical);
    }
}
