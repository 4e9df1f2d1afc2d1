//! # batch-selfplay
//!
//! Lock-step batched chess self-play.
//!
//! Instead of evaluating one position at a time, the driver advances many
//! independent games together: on every iteration it takes one position from
//! each undecided game whose side is due to move, evaluates them as a single
//! network batch and hands the chosen moves back out. Games that have ended,
//! or whose result an endgame database can tell, are resolved without ever
//! reaching the network.
//!
//! ## Modules
//!
//! - `rules`: position history, game trees, openings, move notation
//! - `nn`: policy network traits, batch computation, input encoding
//! - `tablebase`: endgame database probe interface and Syzygy backend
//! - `training`: evaluators and the multi-game self-play driver
//!
//! ## Design Principles
//!
//! 1. **One batch per tempo**: all due games share one network call.
//!
//! 2. **Order is the contract**: moves are read back in gather order, checked
//!    through the `BatchSlot` handles.
//!
//! 3. **Pluggable policy**: anything implementing `Evaluator` can drive the
//!    games; `PolicyEvaluator` is the greedy network policy.

pub mod error;
pub mod nn;
pub mod rules;
pub mod tablebase;
pub mod training;

// Re-export commonly used types
pub use crate::error::{Result, SelfPlayError};

pub use crate::rules::{GameResult, GameTree, Opening, PositionHistory};

pub use crate::nn::{EncodedState, InputFormat, PolicyNetwork};

pub use crate::tablebase::{EndgameTablebase, Probe, ProbeState, WdlScore};

pub use crate::training::{
    Evaluator, MultiGameSelfPlay, PlayerOptions, PolicyEvaluator, SelfPlayConfig,
};
