//! Batched self-play.
//!
//! ## Overview
//!
//! - **Evaluator**: four-phase batch interface (`reset`, `gather`, `run`,
//!   `make_best_move`), with `PolicyEvaluator` as the greedy network policy
//! - **MultiGameSelfPlay**: owns the games and drives the lock-step loop,
//!   consulting the endgame database before the evaluator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use batch_selfplay::training::{MultiGameSelfPlay, PlayerOptions, SelfPlayConfig};
//!
//! let white = PlayerOptions::new(network_a);
//! let black = PlayerOptions::new(network_b);
//! let mut games = MultiGameSelfPlay::new(white, black, &openings, tablebase, SelfPlayConfig::default())?;
//!
//! // From another thread: games.abort_handle().abort();
//! games.play()?;
//!
//! for (i, result) in games.results().iter().enumerate() {
//!     println!("game {i}: {result}");
//! }
//! ```

pub mod evaluator;
pub mod self_play;

// Re-export main types
pub use evaluator::{best_index, BatchSlot, Evaluator, PlayerOptions, PolicyEvaluator};
pub use self_play::{AbortHandle, GameSession, MultiGameSelfPlay, SelfPlayConfig, SelfPlaySummary};
