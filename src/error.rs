//! Error type shared by the whole crate.
//!
//! Construction failures (bad FEN, illegal forced opening move) are the only
//! errors a well-behaved caller should ever see. The remaining variants flag
//! evaluator contract violations and misbehaving networks.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelfPlayError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("illegal move {mv:?} at ply {ply} of game starting from {start_fen:?}")]
    IllegalMove {
        mv: String,
        ply: u32,
        start_fen: String,
    },

    #[error("no move candidates on the current node")]
    NoCandidates,

    #[error("evaluator used before reset")]
    NotReset,

    #[error("batch results read before the batch was run")]
    NotComputed,

    #[error("batch slot {got} used out of order, expected slot {expected}")]
    SlotOutOfOrder { expected: usize, got: usize },

    #[error("network returned {got} policies for a batch of {expected}")]
    BatchSizeMismatch { expected: usize, got: usize },

    #[error("move index {index} outside policy of size {size}")]
    PolicyIndexOutOfRange { index: usize, size: usize },

    #[error("tablebase I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SelfPlayError>;
