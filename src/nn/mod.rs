//! Neural network integration for the self-play driver.
//!
//! ## Overview
//!
//! - **Traits**: `PolicyNetwork`, with its declared `NetworkCapabilities`
//! - **Computation**: `NetworkComputation`, one blocking batch per iteration
//! - **Encoding**: `encode_position_for_nn`, history planes plus a symmetry
//! - **Baseline**: `UniformPolicy`, `RandomPolicy` for testing
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use batch_selfplay::nn::{
//!     encode_position_for_nn, FillEmptyHistory, InputFormat, NetworkComputation, RandomPolicy,
//! };
//! use batch_selfplay::rules::{nn_index, GameTree, STARTING_FEN};
//!
//! let tree = GameTree::from_fen(STARTING_FEN).unwrap();
//! let (planes, transform) = encode_position_for_nn(
//!     InputFormat::Classical,
//!     tree.position_history(),
//!     8,
//!     FillEmptyHistory::FenOnly,
//! );
//!
//! let mut comp = NetworkComputation::new(Arc::new(RandomPolicy::new(0)));
//! comp.add_input(planes);
//! comp.compute_blocking().unwrap();
//!
//! let mv = &tree.legal_moves()[0];
//! assert!(comp.p_val(0, nn_index(mv, false, transform)).is_some());
//! ```

pub mod computation;
pub mod encoder;
pub mod traits;

// Re-export main types
pub use computation::NetworkComputation;
pub use encoder::{choose_transform, encode_position_for_nn, plane_count, FillEmptyHistory};
pub use traits::{
    EncodedState, InputFormat, NetworkCapabilities, PolicyNetwork, RandomPolicy, UniformPolicy,
};
