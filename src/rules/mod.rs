//! Chess rules layer consumed by the self-play driver.
//!
//! Wraps `shakmaty` positions into the pieces the orchestrator needs:
//! - `PositionHistory`: positions played, repetition tracking, terminal results
//! - `GameTree`: history plus move list and the current node's move candidates
//! - `Opening`: starting FEN and forced moves
//! - `moves`: coordinate notation and the policy index mapping

pub mod history;
pub mod moves;
pub mod opening;
pub mod result;
pub mod tree;

pub use history::PositionHistory;
pub use moves::{format_move, nn_index, parse_move, Transform, POLICY_SIZE};
pub use opening::{Opening, STARTING_FEN};
pub use result::GameResult;
pub use tree::{Edge, GameTree, Node};
