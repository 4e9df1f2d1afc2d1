//! One batched network evaluation.
//!
//! A computation collects inputs, runs them through the network in a single
//! blocking call and then answers score queries by batch slot.

use std::sync::Arc;

use crate::error::{Result, SelfPlayError};

use super::traits::{EncodedState, PolicyNetwork};

pub struct NetworkComputation {
    network: Arc<dyn PolicyNetwork>,
    inputs: Vec<EncodedState>,
    outputs: Vec<Vec<f32>>,
}

impl NetworkComputation {
    /// Open an empty computation against `network`.
    pub fn new(network: Arc<dyn PolicyNetwork>) -> Self {
        Self {
            network,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Append one input; its slot is the current batch size.
    pub fn add_input(&mut self, input: EncodedState) {
        self.inputs.push(input);
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.inputs.len()
    }

    /// Whether `compute_blocking` has produced results.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        !self.outputs.is_empty() || self.inputs.is_empty()
    }

    /// Evaluate every input. Returns once all results are available.
    pub fn compute_blocking(&mut self) -> Result<()> {
        if self.inputs.is_empty() {
            self.outputs.clear();
            return Ok(());
        }
        let outputs = self.network.predict_batch(&self.inputs);
        if outputs.len() != self.inputs.len() {
            return Err(SelfPlayError::BatchSizeMismatch {
                expected: self.inputs.len(),
                got: outputs.len(),
            });
        }
        self.outputs = outputs;
        Ok(())
    }

    /// Score of `move_index` for the input in `sample`.
    #[must_use]
    pub fn p_val(&self, sample: usize, move_index: usize) -> Option<f32> {
        self.outputs.get(sample)?.get(move_index).copied()
    }

    /// Length of the policy row for `sample`, zero before computing.
    #[must_use]
    pub fn policy_len(&self, sample: usize) -> usize {
        self.outputs.get(sample).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for NetworkComputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkComputation")
            .field("batch_size", &self.inputs.len())
            .field("computed", &self.outputs.len())
            .finish()
    }
}
