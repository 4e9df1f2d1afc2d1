//! Endgame database short-circuit.
//!
//! Positions with few enough pieces and no castling rights can be resolved
//! straight from an endgame database instead of being played out. The driver
//! only depends on the `EndgameTablebase` trait; `SyzygyTablebase` (enabled by
//! the default `syzygy` feature) backs it with real Syzygy files.

pub mod probe;
#[cfg(feature = "syzygy")]
pub mod syzygy;

pub use probe::{resolve_wdl, EndgameTablebase, Probe, ProbeState, WdlScore};
#[cfg(feature = "syzygy")]
pub use syzygy::SyzygyTablebase;
